pub mod config_repository;
pub mod server_config;
pub mod session;

pub use config_repository::ConfigRepository;
pub use server_config::StaticServerConfig;
pub use session::SessionAuth;
