use crate::domain::entities::FilterField;
use thiserror::Error;

/// Errors raised by a filter state or while synchronizing with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    #[error("Invalid value {value:?} for filter {field}")]
    InvalidValue { field: FilterField, value: String },

    #[error("Filter state unavailable: {0}")]
    Unavailable(String),
}

impl FilterError {
    pub fn invalid(field: FilterField, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
