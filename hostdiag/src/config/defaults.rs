//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::settings::*;

/// Environment used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "public";

/// HTTP request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "hostdiag.log";

/// Default User-Agent: `hostdiag/<version>`.
pub fn default_user_agent() -> String {
    format!("hostdiag/{}", crate::VERSION)
}

/// Default log file path (~/.hostdiag/hostdiag.log).
pub fn default_log_file() -> PathBuf {
    super::file::config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            environment: EnvironmentSettings {
                default: DEFAULT_ENVIRONMENT.to_string(),
            },
            http: HttpSettings {
                timeout: DEFAULT_HTTP_TIMEOUT_SECS,
                user_agent: default_user_agent(),
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
