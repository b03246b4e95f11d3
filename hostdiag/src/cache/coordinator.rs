//! Diagnostics cache coordinator.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use super::entry::{CacheEntry, EntryState, EntryStatus};
use super::stats::CacheStats;
use crate::diagnostics::Diagnostics;
use crate::fetch::{FetchError, Fetcher};

/// Outcome of a non-blocking [`DiagnosticsCache::read`].
#[derive(Debug)]
pub enum Read {
    /// The environment resolved; the same `Arc` is returned on every read
    Ready(Arc<Diagnostics>),
    /// The environment failed; the same error is returned until `clear()`
    Failed(Arc<FetchError>),
    /// A fetch is in flight; await [`Pending::settled`] and read again
    Suspended(Pending),
}

impl Read {
    pub fn is_suspended(&self) -> bool {
        matches!(self, Read::Suspended(_))
    }

    /// Converts a settled read into a `Result`, or `None` while suspended.
    pub fn into_result(self) -> Option<Result<Arc<Diagnostics>, Arc<FetchError>>> {
        match self {
            Read::Ready(data) => Some(Ok(data)),
            Read::Failed(error) => Some(Err(error)),
            Read::Suspended(_) => None,
        }
    }
}

/// Handle to an in-flight fetch.
///
/// Completes when the fetch settles, successfully or not. It carries no
/// result: the caller reads the cache again, which also covers the case where
/// the cache was cleared in the meantime.
#[derive(Debug)]
pub struct Pending {
    environment: String,
    receiver: broadcast::Receiver<()>,
}

impl Pending {
    fn new(environment: &str, receiver: broadcast::Receiver<()>) -> Self {
        Self {
            environment: environment.to_string(),
            receiver,
        }
    }

    /// The environment this fetch belongs to.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Waits until the fetch settles.
    pub async fn settled(mut self) {
        // A closed channel also means the state has moved on.
        let _ = self.receiver.recv().await;
    }
}

/// Keyed cache of diagnostics snapshots with request de-duplication.
///
/// Each environment key moves through `Pending -> Resolved | Failed` exactly
/// once per cache generation. Failures are sticky; only [`clear`] starts a
/// new generation. There is no expiry, eviction or retry.
///
/// Entry creation and `clear()` are serialized by the map lock; the
/// pending-to-settled transition by the entry lock. A fetch is only started
/// while the entry lock is held, so concurrent readers of one key issue a
/// single request.
///
/// `read()` spawns the fetch on the current Tokio runtime and must be called
/// from within one.
///
/// [`clear`]: DiagnosticsCache::clear
pub struct DiagnosticsCache<F> {
    fetcher: Arc<F>,
    entries: Mutex<HashMap<String, Arc<CacheEntry>>>,
    stats: Mutex<CacheStats>,
}

impl<F: Fetcher + 'static> DiagnosticsCache<F> {
    /// Creates an empty cache backed by the given fetcher.
    pub fn new(fetcher: F) -> Self {
        Self::with_shared_fetcher(Arc::new(fetcher))
    }

    /// Creates an empty cache sharing a fetcher with other owners.
    pub fn with_shared_fetcher(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolves an environment or suspends on its in-flight fetch.
    ///
    /// Never blocks. The first read of a key starts the fetch on the current
    /// Tokio runtime; reads while it is in flight join it. Outside a runtime
    /// the read fails with [`FetchError::NoRuntime`] and the key stays empty,
    /// so a later read from inside a runtime fetches normally.
    pub fn read(&self, environment: &str) -> Read {
        let entry = self.entry(environment);
        let mut state = entry.lock();

        match &*state {
            EntryState::Failed(error) => {
                self.record(|stats| stats.failures_served += 1);
                Read::Failed(Arc::clone(error))
            }
            EntryState::Resolved(data) => {
                self.record(|stats| stats.hits += 1);
                Read::Ready(Arc::clone(data))
            }
            EntryState::Pending(sender) => {
                self.record(|stats| stats.coalesced += 1);
                trace!(
                    environment = environment,
                    "Joining in-flight diagnostics fetch"
                );
                Read::Suspended(Pending::new(environment, sender.subscribe()))
            }
            EntryState::Idle => {
                let Ok(runtime) = Handle::try_current() else {
                    warn!(
                        environment = environment,
                        "No Tokio runtime, diagnostics fetch not started"
                    );
                    self.record(|_| {});
                    return Read::Failed(Arc::new(FetchError::NoRuntime));
                };

                self.record(|stats| stats.fetches_started += 1);
                let (sender, receiver) = broadcast::channel(1);
                // The entry lock is held, so the task cannot settle before
                // the entry is marked pending.
                self.spawn_fetch(&runtime, environment, Arc::clone(&entry));
                *state = EntryState::Pending(sender);
                Read::Suspended(Pending::new(environment, receiver))
            }
        }
    }

    /// Reads an environment, waiting through suspensions until it settles.
    pub async fn get(&self, environment: &str) -> Result<Arc<Diagnostics>, Arc<FetchError>> {
        loop {
            match self.read(environment) {
                Read::Ready(data) => return Ok(data),
                Read::Failed(error) => return Err(error),
                Read::Suspended(pending) => pending.settled().await,
            }
        }
    }

    /// Discards every entry.
    ///
    /// In-flight fetches keep running and settle into entries that are no
    /// longer reachable; the next read of their key starts over.
    pub fn clear(&self) {
        let discarded = std::mem::take(&mut *self.entries.lock());
        self.stats.lock().clears += 1;
        debug!(entries = discarded.len(), "Diagnostics cache cleared");
    }

    /// Returns the state of an entry without creating it or starting a fetch.
    pub fn peek(&self, environment: &str) -> Option<EntryStatus> {
        let entry = self.entries.lock().get(environment).cloned();
        entry.map(|entry| entry.status())
    }

    /// Number of entries in the current generation.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        *self.stats.lock()
    }

    /// Logs current statistics.
    pub fn log_stats(&self) {
        let stats = self.stats();
        info!(
            reads = stats.reads,
            hits = stats.hits,
            failures_served = stats.failures_served,
            fetches_started = stats.fetches_started,
            coalesced = stats.coalesced,
            clears = stats.clears,
            entries = self.len(),
            hit_ratio = format!("{:.1}%", stats.hit_ratio() * 100.0),
            "Diagnostics cache statistics"
        );
    }

    fn entry(&self, environment: &str) -> Arc<CacheEntry> {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(environment) {
            return Arc::clone(entry);
        }

        trace!(environment = environment, "Creating cache entry");
        let entry = Arc::new(CacheEntry::new());
        entries.insert(environment.to_string(), Arc::clone(&entry));
        entry
    }

    fn spawn_fetch(&self, runtime: &Handle, environment: &str, entry: Arc<CacheEntry>) {
        debug!(environment = environment, "Starting diagnostics fetch");
        let fetcher = Arc::clone(&self.fetcher);
        let environment = environment.to_string();

        runtime.spawn(async move {
            let outcome = fetcher.fetch(&environment).await;
            entry.settle(&environment, outcome);
        });
    }

    /// Counts a read and how it was served.
    fn record(&self, update: impl FnOnce(&mut CacheStats)) {
        let mut stats = self.stats.lock();
        stats.reads += 1;
        update(&mut stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::http::tests::MockAsyncHttpClient;
    use crate::fetch::{HttpFetcher, HttpResponse};

    const ENVIRONMENT: &str = "https://api.example.com/diagnostics";

    type MockCache = DiagnosticsCache<HttpFetcher<MockAsyncHttpClient>>;

    fn body() -> &'static str {
        r#"{
            "buildInfo": { "buildVersion": "1.0.0" },
            "extensions": {},
            "serverInfo": {
                "deploymentId": "deploy-123",
                "extensionSync": { "totalSyncAllCount": 42 },
                "hostname": "server.example.com",
                "nodeVersions": "v18.17.0",
                "serverId": "server-456",
                "uptime": 1234567890
            }
        }"#
    }

    fn expected() -> Diagnostics {
        serde_json::from_str(body()).unwrap()
    }

    fn cache_with(client: MockAsyncHttpClient) -> MockCache {
        DiagnosticsCache::new(HttpFetcher::new(client))
    }

    fn ok_client() -> MockAsyncHttpClient {
        MockAsyncHttpClient::new(Ok(HttpResponse::ok_with_body(body())))
    }

    fn calls(cache: &MockCache) -> usize {
        cache.fetcher().client().call_count()
    }

    #[tokio::test]
    async fn test_first_read_suspends_then_resolves() {
        let cache = cache_with(ok_client());

        let pending = match cache.read(ENVIRONMENT) {
            Read::Suspended(pending) => pending,
            other => panic!("Expected suspension, got {:?}", other),
        };
        assert_eq!(pending.environment(), ENVIRONMENT);

        pending.settled().await;

        match cache.read(ENVIRONMENT) {
            Read::Ready(data) => assert_eq!(*data, expected()),
            other => panic!("Expected data, got {:?}", other),
        }
        assert_eq!(calls(&cache), 1);
        assert_eq!(
            cache.fetcher().client().requests.lock().as_slice(),
            [ENVIRONMENT]
        );
    }

    #[tokio::test]
    async fn test_reads_before_settle_share_one_fetch() {
        let (client, gate) = ok_client().gated();
        let cache = cache_with(client);

        let pendings: Vec<Pending> = (0..5)
            .map(|_| match cache.read(ENVIRONMENT) {
                Read::Suspended(pending) => pending,
                other => panic!("Expected suspension, got {:?}", other),
            })
            .collect();

        assert!(matches!(
            cache.peek(ENVIRONMENT),
            Some(EntryStatus::Pending { waiters: 5 })
        ));

        gate.add_permits(1);
        futures::future::join_all(pendings.into_iter().map(Pending::settled)).await;

        assert_eq!(calls(&cache), 1);
        let stats = cache.stats();
        assert_eq!(stats.fetches_started, 1);
        assert_eq!(stats.coalesced, 4);
        assert!(matches!(cache.read(ENVIRONMENT), Read::Ready(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_gets_share_one_fetch() {
        let (client, gate) = ok_client().gated();
        let cache = Arc::new(cache_with(client));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get(ENVIRONMENT).await })
            })
            .collect();

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        gate.add_permits(1);

        let results = futures::future::join_all(handles).await;
        let first = results[0].as_ref().unwrap().as_ref().unwrap();
        for result in &results {
            let data = result.as_ref().unwrap().as_ref().unwrap();
            assert!(Arc::ptr_eq(first, data));
        }
        assert_eq!(calls(&cache), 1);
    }

    #[tokio::test]
    async fn test_resolved_reads_return_same_arc() {
        let cache = cache_with(ok_client());

        let first = cache.get(ENVIRONMENT).await.unwrap();
        let second = cache.get(ENVIRONMENT).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls(&cache), 1);
        assert!(cache.stats().hits >= 2);
    }

    #[tokio::test]
    async fn test_failure_is_sticky() {
        let cache = cache_with(MockAsyncHttpClient::new(Ok(HttpResponse::with_status(
            500,
            "Network error",
        ))));

        let first = cache.get(ENVIRONMENT).await.unwrap_err();
        assert_eq!(
            first.to_string(),
            "Failed to fetch diagnostics: Network error"
        );

        for _ in 0..3 {
            match cache.read(ENVIRONMENT) {
                Read::Failed(error) => assert!(Arc::ptr_eq(&first, &error)),
                other => panic!("Expected stored failure, got {:?}", other),
            }
        }
        assert_eq!(calls(&cache), 1);
        assert_eq!(cache.stats().failures_served, 4);
    }

    #[tokio::test]
    async fn test_clear_refetches_resolved_and_failed_keys() {
        let cache = cache_with(ok_client());
        cache.get(ENVIRONMENT).await.unwrap();

        cache.clear();
        assert!(cache.is_empty());
        cache.get(ENVIRONMENT).await.unwrap();
        assert_eq!(calls(&cache), 2);

        let failing = cache_with(MockAsyncHttpClient::new(Ok(HttpResponse::with_status(
            503,
            "Service Unavailable",
        ))));
        failing.get(ENVIRONMENT).await.unwrap_err();
        failing.clear();
        failing.get(ENVIRONMENT).await.unwrap_err();
        assert_eq!(calls(&failing), 2);
    }

    #[tokio::test]
    async fn test_clear_orphans_in_flight_fetch() {
        let (client, gate) = ok_client().gated();
        let cache = cache_with(client);

        let pending = match cache.read(ENVIRONMENT) {
            Read::Suspended(pending) => pending,
            other => panic!("Expected suspension, got {:?}", other),
        };

        cache.clear();
        gate.add_permits(1);
        pending.settled().await;

        // The settled result landed in the discarded generation.
        assert!(cache.peek(ENVIRONMENT).is_none());
        assert!(cache.read(ENVIRONMENT).is_suspended());
        cache.get(ENVIRONMENT).await.unwrap();
        assert_eq!(calls(&cache), 2);
        assert_eq!(cache.stats().clears, 1);
    }

    #[test]
    fn test_read_outside_runtime_leaves_key_empty() {
        let cache = cache_with(ok_client());

        match cache.read(ENVIRONMENT) {
            Read::Failed(error) => assert!(matches!(*error, FetchError::NoRuntime)),
            other => panic!("Expected failure, got {:?}", other),
        }
        assert!(matches!(cache.peek(ENVIRONMENT), Some(EntryStatus::Empty)));
        assert_eq!(cache.stats().fetches_started, 0);
        assert_eq!(calls(&cache), 0);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let data = runtime.block_on(cache.get(ENVIRONMENT)).unwrap();

        assert_eq!(*data, expected());
        assert_eq!(calls(&cache), 1);
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let cache = cache_with(ok_client());

        assert!(cache.read("env1").is_suspended());
        assert!(cache.read("env2").is_suspended());
        assert_eq!(cache.len(), 2);

        cache.get("env1").await.unwrap();
        cache.get("env2").await.unwrap();

        assert_eq!(calls(&cache), 2);
        assert!(cache.peek("env3").is_none());
    }

    #[tokio::test]
    async fn test_parse_failure_passes_through() {
        let body = b"Invalid JSON".to_vec();
        let expected = serde_json::from_slice::<Diagnostics>(&body)
            .unwrap_err()
            .to_string();
        let cache = cache_with(MockAsyncHttpClient::new(Ok(HttpResponse::ok_with_body(body))));

        let error = cache.get(ENVIRONMENT).await.unwrap_err();

        assert!(matches!(*error, FetchError::Parse(_)));
        assert_eq!(error.to_string(), expected);
    }

    #[tokio::test]
    async fn test_read_into_result() {
        let cache = cache_with(ok_client());

        assert!(cache.read(ENVIRONMENT).into_result().is_none());
        let data = cache.get(ENVIRONMENT).await.unwrap();
        let settled = cache.read(ENVIRONMENT).into_result().unwrap().unwrap();
        assert!(Arc::ptr_eq(&data, &settled));
    }
}
