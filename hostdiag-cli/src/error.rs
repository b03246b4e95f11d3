//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use std::sync::Arc;

use hostdiag::config::ConfigFileError;
use hostdiag::environment::EnvironmentError;
use hostdiag::fetch::{FetchError, HttpError};

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Unknown environment name or malformed URL
    Environment(EnvironmentError),
    /// Failed to build the HTTP client
    HttpClient(HttpError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Diagnostics could not be fetched
    Fetch {
        environment: String,
        error: Arc<FetchError>,
    },
    /// Requested extension is missing or only reported an error
    ExtensionNotFound(String),
    /// Terminal setup or drawing failed
    Terminal(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Environment(_) => {
                eprintln!();
                eprintln!("Run 'hostdiag environments' to list known environments.");
            }
            CliError::Fetch { error, .. } if error.status().is_none() => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. The endpoint is unreachable from this network");
                eprintln!("  2. The URL does not serve a diagnostics document");
                eprintln!("  3. The request timed out: raise [http] timeout in config.ini");
            }
            CliError::ExtensionNotFound(_) => {
                eprintln!();
                eprintln!("Run 'hostdiag show --tab extensions' to list extensions.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Environment(e) => write!(f, "{}", e),
            CliError::HttpClient(e) => write!(f, "{}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Fetch { environment, error } => {
                write!(f, "{} ({})", error, environment)
            }
            CliError::ExtensionNotFound(id) => write!(f, "Extension '{}' not found", id),
            CliError::Terminal(e) => write!(f, "Terminal error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Environment(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Fetch { error, .. } => Some(error.as_ref()),
            CliError::Terminal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<EnvironmentError> for CliError {
    fn from(e: EnvironmentError) -> Self {
        CliError::Environment(e)
    }
}

impl From<HttpError> for CliError {
    fn from(e: HttpError) -> Self {
        CliError::HttpClient(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostdiag::fetch::DiagnosticsFetchError;

    #[test]
    fn test_fetch_error_keeps_message() {
        let error = CliError::Fetch {
            environment: "https://example.com/api/diagnostics".to_string(),
            error: Arc::new(FetchError::from(DiagnosticsFetchError {
                status: 500,
                status_text: "Internal Server Error".to_string(),
            })),
        };

        assert_eq!(
            error.to_string(),
            "Failed to fetch diagnostics: Internal Server Error (https://example.com/api/diagnostics)"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_environment_error_converts() {
        let error: CliError = EnvironmentError::Unknown("staging".to_string()).into();
        assert!(matches!(error, CliError::Environment(_)));
        assert!(error.to_string().contains("staging"));
    }
}
