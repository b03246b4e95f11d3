//! Per-environment cache entry.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::diagnostics::Diagnostics;
use crate::fetch::FetchError;

/// Lifecycle of one entry: `Idle -> Pending -> Resolved | Failed`.
///
/// Resolved and Failed are terminal until the owning cache is cleared.
pub(crate) enum EntryState {
    /// Created, no fetch started yet
    Idle,
    /// A fetch is in flight; the sender wakes waiters when it settles
    Pending(broadcast::Sender<()>),
    Resolved(Arc<Diagnostics>),
    Failed(Arc<FetchError>),
}

/// Shared record for one environment key.
///
/// The fetch task holds its own `Arc` to the entry, so a fetch that outlives
/// a `clear()` still settles here even though no cache can reach it anymore.
pub(crate) struct CacheEntry {
    state: Mutex<EntryState>,
}

impl CacheEntry {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(EntryState::Idle),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, EntryState> {
        self.state.lock()
    }

    /// Stores the fetch outcome and wakes everyone suspended on it.
    pub(crate) fn settle(&self, environment: &str, outcome: Result<Diagnostics, FetchError>) {
        let settled = match outcome {
            Ok(diagnostics) => {
                debug!(environment = environment, "Diagnostics resolved");
                EntryState::Resolved(Arc::new(diagnostics))
            }
            Err(error) => {
                debug!(environment = environment, error = %error, "Diagnostics fetch failed");
                EntryState::Failed(Arc::new(error))
            }
        };

        let previous = std::mem::replace(&mut *self.state.lock(), settled);

        if let EntryState::Pending(sender) = previous {
            let waiters = sender.receiver_count();
            // Receivers may already be gone; the state is what matters.
            let _ = sender.send(());
            trace!(
                environment = environment,
                waiters = waiters,
                "Woke suspended readers"
            );
        }
    }

    pub(crate) fn status(&self) -> EntryStatus {
        match &*self.state.lock() {
            EntryState::Idle => EntryStatus::Empty,
            EntryState::Pending(sender) => EntryStatus::Pending {
                waiters: sender.receiver_count(),
            },
            EntryState::Resolved(data) => EntryStatus::Resolved(Arc::clone(data)),
            EntryState::Failed(error) => EntryStatus::Failed(Arc::clone(error)),
        }
    }
}

/// Point-in-time view of an entry, returned by [`super::DiagnosticsCache::peek`].
#[derive(Clone)]
pub enum EntryStatus {
    /// Entry exists but no fetch has been started
    Empty,
    /// A fetch is in flight
    Pending {
        /// Readers currently suspended on the fetch
        waiters: usize,
    },
    Resolved(Arc<Diagnostics>),
    Failed(Arc<FetchError>),
}

impl fmt::Debug for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Empty => write!(f, "Empty"),
            EntryStatus::Pending { waiters } => write!(f, "Pending {{ waiters: {} }}", waiters),
            EntryStatus::Resolved(data) => {
                write!(f, "Resolved({})", data.build_info().build_version)
            }
            EntryStatus::Failed(error) => write!(f, "Failed({})", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::HttpError;

    #[test]
    fn test_new_entry_is_empty() {
        let entry = CacheEntry::new();
        assert!(matches!(entry.status(), EntryStatus::Empty));
    }

    #[tokio::test]
    async fn test_settle_wakes_waiters() {
        let entry = CacheEntry::new();
        let (sender, mut receiver) = broadcast::channel(1);
        *entry.lock() = EntryState::Pending(sender);
        assert!(matches!(entry.status(), EntryStatus::Pending { waiters: 1 }));

        entry.settle("env", Ok(Diagnostics::default()));

        assert!(receiver.recv().await.is_ok());
        assert!(matches!(entry.status(), EntryStatus::Resolved(_)));
    }

    #[test]
    fn test_settle_failure_is_stored() {
        let entry = CacheEntry::new();
        entry.settle(
            "env",
            Err(FetchError::Network(HttpError::Request("refused".to_string()))),
        );

        match entry.status() {
            EntryStatus::Failed(error) => assert_eq!(error.to_string(), "Request failed: refused"),
            other => panic!("Expected failed entry, got {:?}", other),
        }
    }
}
