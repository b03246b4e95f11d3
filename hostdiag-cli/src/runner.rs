//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, the async runtime and
//! cache construction to reduce duplication across command handlers.

use tokio::runtime::Runtime;
use tracing::info;

use hostdiag::cache::DiagnosticsCache;
use hostdiag::config::ConfigFile;
use hostdiag::environment::{environment_name, resolve_locator};
use hostdiag::fetch::{HttpFetcher, ReqwestClient};
use hostdiag::logging::{init_logging, split_log_path, LoggingGuard};

use crate::error::CliError;

/// The cache type every command works with.
pub type Cache = DiagnosticsCache<HttpFetcher<ReqwestClient>>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps the log writer alive while the runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
    runtime: Runtime,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    /// * `stderr_logging` - Mirror log events to stderr; off while a TUI owns the terminal
    pub fn new(debug_mode: bool, stderr_logging: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(log_dir, &log_file, stderr_logging, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("hostdiag-worker")
            .build()
            .map_err(CliError::Runtime)?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
            runtime,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Runtime that drives fetches.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("hostdiag v{}", hostdiag::VERSION);
        info!("hostdiag CLI: {} command", command);
    }

    /// Picks the locator to read: an explicit URL, then an environment name,
    /// then the configured default.
    pub fn locator(&self, env: Option<&str>, url: Option<&str>) -> Result<String, CliError> {
        let locator = match (url, env) {
            (Some(url), _) => resolve_locator(url)?,
            (None, Some(env)) => resolve_locator(env)?,
            (None, None) => self.config.locator()?,
        };
        info!(
            environment = environment_name(Some(&locator)),
            locator = %locator,
            "Resolved diagnostics endpoint"
        );
        Ok(locator)
    }

    /// Create a diagnostics cache backed by a configured HTTP client.
    pub fn create_cache(&self) -> Result<Cache, CliError> {
        let client = ReqwestClient::with_config(&self.config.http_config())?;
        Ok(DiagnosticsCache::new(HttpFetcher::new(client)))
    }
}
