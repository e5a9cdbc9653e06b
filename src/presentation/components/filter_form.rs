use crate::domain::FilterError;
use crate::domain::entities::{FilterEdit, FilterValues};
use crate::domain::services::EventBus;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Editable mirror of the filter values, bound to the toolbar controls.
pub struct FilterForm {
    values: Mutex<FilterValues>,
    value_changes: EventBus<FilterValues, FilterError>,
}

impl FilterForm {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(FilterValues::default()),
            value_changes: EventBus::new(),
        }
    }

    fn values(&self) -> MutexGuard<'_, FilterValues> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn value(&self) -> FilterValues {
        self.values().clone()
    }

    /// Replaces every field at once. With `emit_event` false the value-change
    /// stream stays silent.
    pub fn patch_value(&self, values: FilterValues, emit_event: bool) -> Result<(), FilterError> {
        if !emit_event {
            *self.values() = values;
            return Ok(());
        }

        *self.values() = values.clone();
        self.value_changes.publish(&values)?;
        Ok(())
    }

    /// A single control edit; always emits the full form value.
    pub fn set_field(&self, edit: FilterEdit) -> Result<(), FilterError> {
        let values = {
            let mut values = self.values();
            values.apply(edit);
            values.clone()
        };

        self.value_changes.publish(&values)?;
        Ok(())
    }

    pub fn value_changes(&self) -> &EventBus<FilterValues, FilterError> {
        &self.value_changes
    }
}

impl Default for FilterForm {
    fn default() -> Self {
        Self::new()
    }
}
