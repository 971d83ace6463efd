//! CLI configuration

use serde::Deserialize;

/// CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Pretty-print the report
    pub pretty: bool,
    /// JSON currency list replacing the built-in registry
    pub registry_path: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_json: false,
            pretty: false,
            registry_path: None,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `RECONCILE_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("RECONCILE"))
            .build()?
            .try_deserialize()
    }
}
