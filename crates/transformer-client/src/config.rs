//! Client configuration

use std::fmt;
use std::time::Duration;

/// Default base URL of the asset lifecycle API
pub const DEFAULT_API_URL: &str = "https://transformer.goodbaby.eu/api/v1/";

/// Default base URL of the delivery service
pub const DEFAULT_DELIVERY_URL: &str = "https://images.goodbaby.eu/";

/// Default timeout for both request paths
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration
#[derive(Clone)]
pub struct Config {
    /// Shared secret sent as the `key` part of every API request
    pub secret: String,
    /// Base URL of the asset lifecycle API
    pub api_url: String,
    /// Timeout for API requests
    pub api_timeout: Duration,
    /// Base URL of the delivery service
    pub delivery_url: String,
    /// Timeout for delivery requests
    pub delivery_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("api_timeout", &self.api_timeout)
            .field("delivery_url", &self.delivery_url)
            .field("delivery_timeout", &self.delivery_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: DEFAULT_TIMEOUT,
            delivery_url: DEFAULT_DELIVERY_URL.to_string(),
            delivery_timeout: DEFAULT_TIMEOUT,
            user_agent: format!("transformer-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Create a new config with the given secret and default endpoints
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the API base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the delivery base URL
    pub fn with_delivery_url(mut self, url: impl Into<String>) -> Self {
        self.delivery_url = url.into();
        self
    }

    /// Set the API timeout
    pub fn with_api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = timeout;
        self
    }

    /// Set the delivery timeout
    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
