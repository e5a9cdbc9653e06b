use crate::domain::entities::{FilterField, FilterPatch, FilterValues};
use crate::domain::error::FilterError;
use crate::domain::services::Subscription;

pub type ChangeListener = Box<dyn Fn() -> Result<(), FilterError> + Send + Sync>;

/// Source of truth for the current video filter values.
///
/// Every mutation, whatever its origin, notifies the `on_change` listeners
/// exactly once after the new values are in place. A listener error aborts
/// the notification and is returned from the mutating call.
pub trait FilterState: Send + Sync {
    fn on_change(&self, listener: ChangeListener) -> Subscription;

    fn load(&self, patch: FilterPatch) -> Result<(), FilterError>;

    fn reset(&self, field: FilterField) -> Result<(), FilterError>;

    /// Full snapshot, with defaults substituted for unset fields.
    fn to_form_object(&self) -> Result<FilterValues, FilterError>;
}
