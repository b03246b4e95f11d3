//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Environment selection
    pub environment: EnvironmentSettings,
    /// HTTP client settings
    pub http: HttpSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Environment selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSettings {
    /// Environment id (`public`, `fairfax`, `mooncake`) or a literal URL
    pub default: String,
}

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
