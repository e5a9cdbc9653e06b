//! Filters toolbar for video lists: keeps an editable form and a shared
//! filter state in sync and signals when the list should be re-queried.

pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::FilterError;
pub use presentation::components::VideoFiltersHeader;
