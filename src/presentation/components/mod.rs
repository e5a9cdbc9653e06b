pub mod filter_form;
pub mod filters_header;

pub use filter_form::FilterForm;
pub use filters_header::{ClickEvent, HeaderInputs, SortOption, VideoFiltersHeader};
