//! `hostdiag dashboard`: interactive terminal UI.

use clap::Args;

use super::common::TargetArgs;
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::tui_app;

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Run the dashboard command.
pub fn run(args: DashboardArgs, debug: bool) -> Result<(), CliError> {
    // Log to file only; the dashboard owns the terminal.
    let runner = CliRunner::new(debug, false)?;
    runner.log_startup("dashboard");

    let locator = runner.locator(args.target.env.as_deref(), args.target.url.as_deref())?;
    let cache = runner.create_cache()?;

    tui_app::run(runner.runtime(), &cache, locator)
}
