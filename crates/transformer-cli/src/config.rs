//! Layered settings for the command line client
//!
//! Sources, later ones win: built-in defaults, a TOML file, `TRANSFORMER_*`
//! environment variables, then command line flags (applied by the caller).

use std::path::Path;
use std::time::Duration;

use ::config::{Environment, File};
use serde::{Deserialize, Serialize};
use transformer_client::{Config, DEFAULT_API_URL, DEFAULT_DELIVERY_URL, DEFAULT_TIMEOUT};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TRANSFORMER";

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "transformer";

/// Client settings as read from the configuration sources
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Shared secret for the API
    pub secret: String,
    /// API base URL
    pub api_url: String,
    /// Delivery base URL
    pub delivery_url: String,
    /// API timeout in seconds
    pub api_timeout: u64,
    /// Delivery timeout in seconds
    pub delivery_timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            delivery_url: DEFAULT_DELIVERY_URL.to_string(),
            api_timeout: DEFAULT_TIMEOUT.as_secs(),
            delivery_timeout: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    /// Load defaults, then `path` (or `transformer.toml` if present), then
    /// the environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let defaults = Settings::default();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = ::config::Config::builder()
            .set_default("secret", defaults.secret)?
            .set_default("api_url", defaults.api_url)?
            .set_default("delivery_url", defaults.delivery_url)?
            .set_default("api_timeout", defaults.api_timeout)?
            .set_default("delivery_timeout", defaults.delivery_timeout)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Build the client configuration
    pub fn client_config(&self) -> Config {
        Config::new(self.secret.clone())
            .with_api_url(self.api_url.clone())
            .with_delivery_url(self.delivery_url.clone())
            .with_api_timeout(Duration::from_secs(self.api_timeout))
            .with_delivery_timeout(Duration::from_secs(self.delivery_timeout))
    }
}
