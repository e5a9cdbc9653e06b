use crate::domain::entities::ServerConfig;
use crate::domain::gateways::ServerConfigGateway;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

/// Server configuration snapshot held in memory and swapped on refresh.
pub struct StaticServerConfig {
    config: RwLock<ServerConfig>,
}

impl StaticServerConfig {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config = serde_json::from_str(content).context("Failed to parse server config")?;
        Ok(Self::new(config))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read server config {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn replace(&self, config: ServerConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }
}

impl Default for StaticServerConfig {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

impl ServerConfigGateway for StaticServerConfig {
    fn server_config(&self) -> ServerConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TrendingAlgorithm;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.json");
        fs::write(
            &path,
            r#"{ "instance": { "name": "demo" }, "trending": { "videos": { "algorithms": { "enabled": ["best"] } } } }"#,
        )
        .unwrap();

        let gateway = StaticServerConfig::load(&path).unwrap();
        assert!(gateway.server_config().is_algorithm_enabled(TrendingAlgorithm::Best));
    }

    #[test]
    fn test_replace_swaps_snapshot() {
        let gateway = StaticServerConfig::default();
        assert!(!gateway.server_config().is_algorithm_enabled(TrendingAlgorithm::Hot));

        gateway.replace(ServerConfig::with_enabled_algorithms(["hot"]));
        assert!(gateway.server_config().is_algorithm_enabled(TrendingAlgorithm::Hot));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StaticServerConfig::load(&dir.path().join("absent.json")).is_err());
    }
}
