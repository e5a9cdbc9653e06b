use crate::domain::entities::ServerConfig;

pub trait ServerConfigGateway: Send + Sync {
    /// Current snapshot of the server's public configuration.
    fn server_config(&self) -> ServerConfig;
}
