//! Known diagnostics environments.
//!
//! The environment locator doubles as the cache key. Besides the three
//! well-known clouds, any literal `http(s)` URL is accepted as a locator.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Label used when a locator is not one of the known environments.
pub const UNKNOWN_ENVIRONMENT_NAME: &str = "Select environment";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    #[error("Unknown environment '{0}': expected public, fairfax, mooncake or an http(s) URL")]
    Unknown(String),
}

/// A hosting cloud that serves a diagnostics endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    Public,
    Fairfax,
    Mooncake,
}

impl Environment {
    /// All known environments, in menu order.
    pub const ALL: [Environment; 3] = [
        Environment::Public,
        Environment::Fairfax,
        Environment::Mooncake,
    ];

    /// Diagnostics endpoint URL.
    pub fn url(&self) -> &'static str {
        match self {
            Environment::Public => "https://hosting.portal.azure.net/api/diagnostics",
            Environment::Fairfax => {
                "https://hosting.azureportal.usgovcloudapi.net/api/diagnostics"
            }
            Environment::Mooncake => "https://hosting.azureportal.chinacloudapi.cn/api/diagnostics",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Environment::Public => "Public Cloud",
            Environment::Fairfax => "Fairfax",
            Environment::Mooncake => "Mooncake",
        }
    }

    /// Short identifier used in config files and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Environment::Public => "public",
            Environment::Fairfax => "fairfax",
            Environment::Mooncake => "mooncake",
        }
    }

    /// Finds the environment whose endpoint is exactly `url`.
    pub fn from_url(url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|env| env.url() == url)
    }

    /// The environment after this one, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            Environment::Public => Environment::Fairfax,
            Environment::Fairfax => Environment::Mooncake,
            Environment::Mooncake => Environment::Public,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Environment {
    type Err = EnvironmentError;

    /// Parses an identifier (case-insensitive) or one of the endpoint URLs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(env) = Self::from_url(trimmed) {
            return Ok(env);
        }
        Self::ALL
            .into_iter()
            .find(|env| env.id().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EnvironmentError::Unknown(trimmed.to_string()))
    }
}

/// Display name for a locator, or [`UNKNOWN_ENVIRONMENT_NAME`].
pub fn environment_name(locator: Option<&str>) -> &'static str {
    locator
        .and_then(Environment::from_url)
        .map(|env| env.display_name())
        .unwrap_or(UNKNOWN_ENVIRONMENT_NAME)
}

/// Turns an environment id or literal URL into a locator.
pub fn resolve_locator(value: &str) -> Result<String, EnvironmentError> {
    let trimmed = value.trim();
    if let Ok(env) = trimmed.parse::<Environment>() {
        return Ok(env.url().to_string());
    }
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        return Ok(trimmed.to_string());
    }
    Err(EnvironmentError::Unknown(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Environment::Public.display_name(), "Public Cloud");
        assert_eq!(Environment::Fairfax.to_string(), "Fairfax");
        assert_eq!(Environment::Mooncake.display_name(), "Mooncake");
    }

    #[test]
    fn test_environment_name_for_locator() {
        assert_eq!(
            environment_name(Some(Environment::Fairfax.url())),
            "Fairfax"
        );
        assert_eq!(
            environment_name(Some("https://example.com/api/diagnostics")),
            UNKNOWN_ENVIRONMENT_NAME
        );
        assert_eq!(environment_name(None), "Select environment");
    }

    #[test]
    fn test_parse_from_id_and_url() {
        assert_eq!("public".parse::<Environment>(), Ok(Environment::Public));
        assert_eq!("MOONCAKE".parse::<Environment>(), Ok(Environment::Mooncake));
        assert_eq!(
            Environment::Fairfax.url().parse::<Environment>(),
            Ok(Environment::Fairfax)
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_resolve_locator() {
        assert_eq!(
            resolve_locator("fairfax").unwrap(),
            Environment::Fairfax.url()
        );
        assert_eq!(
            resolve_locator("http://localhost:8080/api/diagnostics").unwrap(),
            "http://localhost:8080/api/diagnostics"
        );
        assert_eq!(
            resolve_locator("localhost"),
            Err(EnvironmentError::Unknown("localhost".to_string()))
        );
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut env = Environment::default();
        let mut seen = Vec::new();
        for _ in 0..Environment::ALL.len() {
            seen.push(env);
            env = env.next();
        }
        assert_eq!(seen, Environment::ALL.to_vec());
        assert_eq!(env, Environment::Public);
    }
}
