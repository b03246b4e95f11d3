//! hostdiag CLI - Command-line interface
//!
//! This binary provides a command-line interface to the hostdiag library:
//! one-shot text output and an interactive dashboard.

mod commands;
mod error;
mod output;
mod runner;
mod tui_app;
mod ui;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::dashboard::DashboardArgs;
use commands::show::ShowArgs;

#[derive(Parser)]
#[command(name = "hostdiag")]
#[command(version = hostdiag::VERSION)]
#[command(about = "Inspect hosting-service diagnostics", long_about = None)]
struct Cli {
    /// Enable debug-level logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch diagnostics once and print them as tables
    Show(ShowArgs),

    /// Open the interactive diagnostics dashboard
    Dashboard(DashboardArgs),

    /// List known environments
    Environments,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show(args) => commands::show::run(args, cli.debug),
        Commands::Dashboard(args) => commands::dashboard::run(args, cli.debug),
        Commands::Environments => commands::environments::run(),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
