//! Configuration for hostdiag.
//!
//! - [`ConfigFile`]: the user's `~/.hostdiag/config.ini`
//! - [`HttpConfig`]: HTTP client settings derived from it
//!
//! # Example
//!
//! ```
//! use hostdiag::config::{ConfigFile, HttpConfig};
//!
//! let config = ConfigFile::default();
//! let http: HttpConfig = config.http_config();
//! assert_eq!(http.timeout_secs(), 30);
//! ```

mod defaults;
mod file;
mod http;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_log_file, default_user_agent, DEFAULT_ENVIRONMENT, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_LOG_FILE_NAME,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use http::HttpConfig;
pub use settings::{ConfigFile, EnvironmentSettings, HttpSettings, LoggingSettings};
