//! Common types and utilities shared across CLI commands.

use clap::Args;

/// Environment selection for commands that read diagnostics.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Environment to read (public, fairfax, mooncake); defaults to config.ini
    #[arg(long, conflicts_with = "url")]
    pub env: Option<String>,

    /// Literal diagnostics endpoint URL
    #[arg(long)]
    pub url: Option<String>,
}
