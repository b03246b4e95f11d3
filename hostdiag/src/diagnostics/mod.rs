//! Diagnostics data contract.
//!
//! The payload returned by a host's diagnostics endpoint: build metadata,
//! per-extension details (or last errors) and server runtime metadata.
//! The cache treats it as an opaque value; the view layer reads typed
//! projections of it.

mod types;

pub use types::{
    display_text, BuildInfo, Diagnostics, ExtensionEntry, ExtensionError, ExtensionInfo,
    ExtensionSync, LastError, ServerInfo, PAAS_SERVERLESS, WEBSITES,
};
