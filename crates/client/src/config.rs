//! Client configuration.
//!
//! Configuration is a plain value: construct it programmatically, take
//! the defaults, or read the environment overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FHIR_CLIENT_BASE_URL` | http://localhost:8080/fhir | Server base URL |
//! | `FHIR_CLIENT_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `FHIR_CLIENT_USER_AGENT` | lumen-client/0.1 | User-Agent header |
//!
//! # Example
//!
//! ```rust
//! use lumen_client::ClientConfig;
//!
//! // From the environment
//! let config = ClientConfig::from_env();
//!
//! // Or programmatically
//! let config = ClientConfig {
//!     base_url: "http://example.com/fhir".to_string(),
//!     ..Default::default()
//! };
//! ```

/// Configuration for a [`crate::FhirClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The server base URL searches are issued against.
    pub base_url: String,

    /// Request timeout in seconds.
    pub request_timeout: u64,

    /// The User-Agent header sent with each request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/fhir".to_string(),
            request_timeout: 30,
            user_agent: concat!("lumen-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given base URL, defaults elsewhere.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Creates a configuration from environment variables, falling back
    /// to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: std::env::var("FHIR_CLIENT_BASE_URL").unwrap_or(defaults.base_url),
            request_timeout: std::env::var("FHIR_CLIENT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout),
            user_agent: std::env::var("FHIR_CLIENT_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, 30);
        assert!(config.user_agent.starts_with("lumen-client/"));
    }

    #[test]
    fn test_new_overrides_base_url() {
        let config = ClientConfig::new("http://example.com/fhir");
        assert_eq!(config.base_url, "http://example.com/fhir");
        assert_eq!(config.request_timeout, 30);
    }
}
