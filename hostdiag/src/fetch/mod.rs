//! Network access for diagnostics snapshots.
//!
//! - [`AsyncHttpClient`] / [`ReqwestClient`]: transport, mockable in tests
//! - [`Fetcher`] / [`HttpFetcher`]: one GET per call, status check, JSON parse
//!
//! # Error taxonomy
//!
//! | Failure                         | Variant               | Message                                   |
//! |---------------------------------|-----------------------|-------------------------------------------|
//! | Non-2xx response                | `FetchError::Status`  | `Failed to fetch diagnostics: <reason>`   |
//! | Body is not a diagnostics doc   | `FetchError::Parse`   | serde_json's message, unchanged           |
//! | Request or body read failed     | `FetchError::Network` | transport message, unchanged              |

mod fetcher;
pub(crate) mod http;
mod types;

pub use fetcher::{Fetcher, HttpFetcher};
pub use http::{AsyncHttpClient, HttpResponse, ReqwestClient};
pub use types::{DiagnosticsFetchError, FetchError, HttpError};
