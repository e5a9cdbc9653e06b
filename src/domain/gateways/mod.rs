pub mod auth_gateway;
pub mod filter_state;
pub mod server_config_gateway;

pub use auth_gateway::AuthGateway;
pub use filter_state::{ChangeListener, FilterState};
pub use server_config_gateway::ServerConfigGateway;
