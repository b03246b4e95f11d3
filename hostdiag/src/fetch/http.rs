//! HTTP client abstraction for testability

use std::future::Future;

use tracing::{debug, trace, warn};

use super::types::HttpError;
use crate::config::HttpConfig;

/// A fully read HTTP response.
///
/// Non-success statuses are returned as responses, not errors; deciding what
/// a failed status means is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric status code
    pub status: u16,
    /// Reason phrase for the status (may be empty)
    pub status_text: String,
    /// Raw response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a `200 OK` response with the given body.
    pub fn ok_with_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    /// Creates a bodiless response with the given status.
    pub fn with_status(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: Vec::new(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for asynchronous HTTP client operations.
///
/// Allows the fetcher to be driven by a mock in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request and reads the whole body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request, used verbatim
    ///
    /// # Returns
    ///
    /// The response (whatever its status) or a transport error.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the default [`HttpConfig`].
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a client with a custom timeout and user agent.
    pub fn with_config(config: &HttpConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    is_request = e.is_request(),
                    "HTTP request failed"
                );
                return Err(HttpError::Request(e.to_string()));
            }
        };

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(HttpResponse {
                    status: status.as_u16(),
                    status_text,
                    body: bytes.to_vec(),
                })
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(HttpError::Body(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    /// Mock async HTTP client for testing.
    ///
    /// Counts calls and records requested URLs. When a gate is set, every
    /// request blocks until a permit is added, which keeps a fetch in flight
    /// for as long as a test needs.
    #[derive(Clone)]
    pub struct MockAsyncHttpClient {
        pub response: Result<HttpResponse, HttpError>,
        pub calls: Arc<AtomicUsize>,
        pub requests: Arc<Mutex<Vec<String>>>,
        pub gate: Option<Arc<Semaphore>>,
    }

    impl MockAsyncHttpClient {
        pub fn new(response: Result<HttpResponse, HttpError>) -> Self {
            Self {
                response,
                calls: Arc::new(AtomicUsize::new(0)),
                requests: Arc::new(Mutex::new(Vec::new())),
                gate: None,
            }
        }

        /// Holds every request until [`Semaphore::add_permits`] is called.
        pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
            let gate = Arc::new(Semaphore::new(0));
            self.gate = Some(Arc::clone(&gate));
            (self, gate)
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().push(url.to_string());
            if let Some(gate) = &self.gate {
                let _permit = gate.acquire().await;
            }
            self.response.clone()
        }
    }

    #[test]
    fn test_response_ok_range() {
        assert!(HttpResponse::ok_with_body("{}").ok());
        assert!(HttpResponse::with_status(204, "No Content").ok());
        assert!(!HttpResponse::with_status(301, "Moved Permanently").ok());
        assert!(!HttpResponse::with_status(404, "Not Found").ok());
        assert!(!HttpResponse::with_status(503, "Service Unavailable").ok());
    }

    #[tokio::test]
    async fn test_mock_async_client_success() {
        let mock = MockAsyncHttpClient::new(Ok(HttpResponse::ok_with_body(vec![1, 2, 3, 4])));

        let result = mock.get("http://example.com").await;
        assert_eq!(result.unwrap().body, vec![1, 2, 3, 4]);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.requests.lock().as_slice(), ["http://example.com"]);
    }

    #[tokio::test]
    async fn test_mock_async_client_error() {
        let mock = MockAsyncHttpClient::new(Err(HttpError::Request("Test error".to_string())));

        let result = mock.get("http://example.com").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_reqwest_client_builds_with_defaults() {
        assert!(ReqwestClient::new().is_ok());
    }
}
