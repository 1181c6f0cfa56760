//! Configuration types and loading logic.

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

use crate::deployment_context::DeploymentContext;
use crate::error::Result;
use crate::server::{Server, ServerEntry};

/// Top-level load balancer configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LbConfig {
    #[serde(default)]
    pub deployment: DeploymentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

/// Where this client runs. Used to seed the zone preference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentConfig {
    #[serde(default)]
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "zone_preference_lb=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl DeploymentContext for DeploymentConfig {
    fn zone(&self) -> Option<String> {
        self.zone.clone()
    }
}

impl LbConfig {
    /// Load configuration from TOML file and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LOADBALANCER_ prefix, __ for nesting)
    /// 2. TOML config file
    /// 3. Defaults
    pub fn load(config_path: &str) -> Result<Self> {
        let config = Self::figment(config_path).extract()?;
        Ok(config)
    }

    fn figment(config_path: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("LOADBALANCER_").split("__"))
    }

    pub fn server_list(&self) -> Result<Vec<Server>> {
        self.servers.iter().map(ServerEntry::to_server).collect()
    }
}
