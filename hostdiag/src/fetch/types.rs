//! Fetch error types.

use thiserror::Error;

/// Errors raised by the HTTP transport itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
    /// The request could not be sent (DNS, connect, timeout, bad URL)
    #[error("Request failed: {0}")]
    Request(String),
    /// The response body could not be read
    #[error("Failed to read response: {0}")]
    Body(String),
}

/// The host answered, but with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to fetch diagnostics: {status_text}")]
pub struct DiagnosticsFetchError {
    /// Numeric HTTP status code
    pub status: u16,
    /// Reason phrase, used verbatim in the message
    pub status_text: String,
}

/// Any failure of a single diagnostics fetch.
///
/// Only non-success responses are normalized into [`DiagnosticsFetchError`].
/// Parse and transport failures keep their own messages.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Status(#[from] DiagnosticsFetchError),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Network(#[from] HttpError),
    /// The fetch could not be started because no Tokio runtime was running
    #[error("No Tokio runtime to run the diagnostics fetch on")]
    NoRuntime,
}

impl FetchError {
    /// HTTP status code, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(e) => Some(e.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = FetchError::from(DiagnosticsFetchError {
            status: 503,
            status_text: "Network error".to_string(),
        });

        assert_eq!(error.to_string(), "Failed to fetch diagnostics: Network error");
        assert_eq!(error.status(), Some(503));
    }

    #[test]
    fn test_parse_error_message_is_unchanged() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = parse_error.to_string();

        let error = FetchError::from(parse_error);
        assert_eq!(error.to_string(), expected);
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_network_error_message_is_unchanged() {
        let error = FetchError::from(HttpError::Request("connection refused".to_string()));
        assert_eq!(error.to_string(), "Request failed: connection refused");
    }
}
