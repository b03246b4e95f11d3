//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, init, show)
//! - [`dashboard`] - Interactive terminal UI
//! - [`environments`] - Known environments
//! - [`show`] - One-shot text output

pub mod common;
pub mod config;
pub mod dashboard;
pub mod environments;
pub mod show;
