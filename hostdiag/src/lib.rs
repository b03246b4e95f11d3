//! hostdiag - diagnostics viewer for hosting-service environments
//!
//! This library fetches the `/api/diagnostics` document of a hosting
//! environment and caches it per environment, so that a rendering loop can
//! read it without blocking.
//!
//! # High-Level API
//!
//! ```ignore
//! use hostdiag::cache::{DiagnosticsCache, Read};
//! use hostdiag::environment::Environment;
//! use hostdiag::fetch::{HttpFetcher, ReqwestClient};
//!
//! let cache = DiagnosticsCache::new(HttpFetcher::new(ReqwestClient::new()?));
//! let diagnostics = cache.get(Environment::Public.url()).await?;
//! println!("{}", diagnostics.build_info().build_version);
//! ```

pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod environment;
pub mod fetch;
pub mod logging;
pub mod view;

/// Version of the hostdiag library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
