//! Terminal UI for hostdiag.
//!
//! Shows one environment's diagnostics with tabs for extensions, build and
//! server information.

pub mod dashboard;

pub use dashboard::{Dashboard, DashboardEvent, DashboardState};
