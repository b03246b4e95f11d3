//! HTTP client configuration.

use std::time::Duration;

use super::defaults::{default_user_agent, DEFAULT_HTTP_TIMEOUT_SECS};

/// Configuration for the diagnostics HTTP client.
///
/// # Example
///
/// ```
/// use hostdiag::config::HttpConfig;
///
/// // Using defaults
/// let config = HttpConfig::default();
/// assert_eq!(config.timeout_secs(), 30);
///
/// // Custom configuration
/// let config = HttpConfig::new()
///     .with_timeout_secs(10)
///     .with_user_agent("hostdiag-test/1.0");
/// assert_eq!(config.user_agent(), "hostdiag-test/1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout (in seconds)
    timeout_secs: u64,
    /// User-Agent header value
    user_agent: String,
}

impl HttpConfig {
    /// Create a new HTTP configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout in seconds.
    ///
    /// A request that exceeds it fails as a network error. Default: 30 seconds.
    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Get the request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Get the request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the User-Agent header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout_secs(), DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.user_agent(), default_user_agent());
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(HttpConfig::new(), HttpConfig::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = HttpConfig::new()
            .with_timeout_secs(45)
            .with_user_agent("hostdiag-test/2.0");

        assert_eq!(config.timeout_secs(), 45);
        assert_eq!(config.user_agent(), "hostdiag-test/2.0");
    }
}
