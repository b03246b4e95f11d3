//! Diagnostics fetcher.

use std::future::Future;

use tracing::debug;

use super::http::AsyncHttpClient;
use super::types::{DiagnosticsFetchError, FetchError};
use crate::diagnostics::Diagnostics;

/// Source of diagnostics snapshots.
///
/// One call performs exactly one request. Implementations do no caching;
/// de-duplication belongs to [`crate::cache::DiagnosticsCache`].
pub trait Fetcher: Send + Sync {
    /// Fetches and parses the diagnostics payload for an environment locator.
    fn fetch(
        &self,
        environment: &str,
    ) -> impl Future<Output = Result<Diagnostics, FetchError>> + Send;
}

/// Fetcher that GETs the environment locator over HTTP.
pub struct HttpFetcher<C> {
    client: C,
}

impl<C: AsyncHttpClient> HttpFetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: AsyncHttpClient> Fetcher for HttpFetcher<C> {
    async fn fetch(&self, environment: &str) -> Result<Diagnostics, FetchError> {
        let response = self.client.get(environment).await?;

        if !response.ok() {
            return Err(DiagnosticsFetchError {
                status: response.status,
                status_text: response.status_text,
            }
            .into());
        }

        let diagnostics: Diagnostics = serde_json::from_slice(&response.body)?;
        debug!(
            environment = environment,
            build_version = %diagnostics.build_info().build_version,
            extensions = diagnostics.extensions().len(),
            "Diagnostics fetched"
        );
        Ok(diagnostics)
    }
}
