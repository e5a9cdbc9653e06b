pub mod components;
pub mod services;
