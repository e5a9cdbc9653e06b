pub mod entities;
pub mod error;
pub mod gateways;
pub mod services;

pub use error::FilterError;
