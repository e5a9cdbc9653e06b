pub mod modal_service;

pub use modal_service::{ModalEvent, ModalService};
