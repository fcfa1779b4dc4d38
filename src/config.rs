//! Builder-layer configuration.
//!
//! Loads settings from `config/config.toml` (`[builder]` section) with
//! `BUOY`-prefixed environment variable overrides, e.g.
//! `BUOY__BUILDER__LOG_STATEMENTS`.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BuilderConfig {
    /// Emit rendered SQL at debug level from terminal operations
    #[serde(default = "default_log_statements")]
    pub log_statements: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            log_statements: default_log_statements(),
        }
    }
}

fn default_log_statements() -> bool {
    true
}

static GLOBAL: Lazy<BuilderConfig> = Lazy::new(|| BuilderConfig::load().unwrap_or_default());

impl BuilderConfig {
    /// Load the builder configuration from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/config.toml").required(false))
            .add_source(Environment::with_prefix("BUOY").separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                if std::path::Path::new("config/config.toml").exists() {
                    log::warn!("failed to load config file, falling back to env: {err}");
                }
                Config::builder()
                    .add_source(Environment::with_prefix("BUOY").separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {err}, then env-only error: {env_err}"
                        ))
                    })?
            }
        };

        // The section is optional; absent settings fall back to defaults.
        match settings.get::<BuilderConfig>("builder") {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }

    /// The process-wide configuration, loaded once on first use
    pub fn global() -> &'static Self {
        &GLOBAL
    }
}
