//! Client configuration
//!
//! A single externally supplied backend URL selects the host; everything else
//! has a fixed default.

use std::time::Duration;

use crate::errors::ApiError;

/// Environment variable holding the backend host, e.g. `https://api.example.com`
pub const BACKEND_URL_ENV: &str = "PORTFOLIO_BACKEND_URL";

/// Environment variable toggling development request logging
pub const DEV_LOGGING_ENV: &str = "PORTFOLIO_DEV_LOGGING";

/// Versioned API path appended to the backend URL
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the shared HTTP client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    backend_url: String,
    api_prefix: String,
    timeout: Duration,
    dev_logging: bool,
}

impl ClientConfig {
    /// Create a configuration for the given backend host with default settings
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
            dev_logging: cfg!(debug_assertions),
        }
    }

    /// Read the configuration from the process environment
    ///
    /// ## Errors
    ///
    /// Returns `ApiError::Configuration` if `PORTFOLIO_BACKEND_URL` is unset or empty.
    pub fn from_env() -> Result<Self, ApiError> {
        let backend_url = std::env::var(BACKEND_URL_ENV).unwrap_or_default();
        let mut config = Self::new(backend_url);
        if let Ok(flag) = std::env::var(DEV_LOGGING_ENV) {
            config.dev_logging = parse_flag(&flag).unwrap_or(config.dev_logging);
        }
        config.validate()?;
        Ok(config)
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the API path appended to the backend URL
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Enable or disable development request logging
    pub fn with_dev_logging(mut self, enabled: bool) -> Self {
        self.dev_logging = enabled;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn dev_logging(&self) -> bool {
        self.dev_logging
    }

    /// Backend URL joined with the API prefix, without a trailing slash
    pub fn base_url(&self) -> String {
        let host = self.backend_url.trim().trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            host.to_string()
        } else {
            format!("{host}/{prefix}")
        }
    }

    /// Check that a backend host was supplied
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.backend_url.trim().is_empty() {
            return Err(ApiError::Configuration(format!(
                "{BACKEND_URL_ENV} is not set"
            )));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_joins_host_and_prefix() {
        let config = ClientConfig::new("https://api.example.com/");
        assert_eq!(config.base_url(), "https://api.example.com/api/v1");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn custom_prefix_is_normalized() {
        let config = ClientConfig::new("http://localhost:8000").with_api_prefix("v2/");
        assert_eq!(config.base_url(), "http://localhost:8000/v2");

        let bare = ClientConfig::new("http://localhost:8000").with_api_prefix("");
        assert_eq!(bare.base_url(), "http://localhost:8000");
    }

    #[test]
    fn empty_backend_url_is_a_configuration_error() {
        let err = ClientConfig::new("  ").validate().unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn flags_parse_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
