//! Diagnostics cache and fetch coordinator.
//!
//! Turns per-environment asynchronous fetches into a non-blocking
//! "resolve or suspend" read for a rendering loop.
//!
//! # Architecture
//!
//! ```text
//! read("env") ─┐
//!              │                                   Fetcher
//! read("env") ─┼──► DiagnosticsCache ──(1 task)──► GET env
//!              │        │                            │
//! read("env") ─┘        │                            ▼
//!                 Suspended(Pending)            settle entry
//!                       │                            │
//!                       └──── woken on settle ◄──────┘
//!                             read again → Ready | Failed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use hostdiag::cache::{DiagnosticsCache, Read};
//! use hostdiag::fetch::{HttpFetcher, ReqwestClient};
//!
//! let cache = DiagnosticsCache::new(HttpFetcher::new(ReqwestClient::new()?));
//! match cache.read(url) {
//!     Read::Ready(diagnostics) => render(&diagnostics),
//!     Read::Failed(error) => show_error(&error),
//!     Read::Suspended(_) => show_loading(),
//! }
//! ```

mod coordinator;
mod entry;
mod stats;

pub use coordinator::{DiagnosticsCache, Pending, Read};
pub use entry::EntryStatus;
pub use stats::CacheStats;
