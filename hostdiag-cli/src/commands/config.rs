//! Configuration management CLI commands.
//!
//! Provides `config path`, `config init` and `config show`.

use clap::Subcommand;
use hostdiag::config::{config_file_path, ConfigFile};
use hostdiag::environment::environment_name;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Create the configuration file with defaults if it doesn't exist
    Init,

    /// Show the effective configuration
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Init => run_init(),
        ConfigCommands::Show => run_show(),
    }
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_init() -> Result<(), CliError> {
    let existed = config_file_path().exists();
    let path = ConfigFile::ensure_exists()?;

    if existed {
        println!("Configuration already exists at {}", path.display());
    } else {
        println!("Created {}", path.display());
    }
    Ok(())
}

/// Show the effective configuration, defaults included.
fn run_show() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load()?;

    println!("Configuration Settings");
    println!("======================");
    if path.exists() {
        println!("Source: {}", path.display());
    } else {
        println!("Source: defaults ({} not found)", path.display());
    }
    println!();

    let locator = config.locator()?;
    println!("[environment]");
    println!(
        "  default = {} ({})",
        config.environment.default,
        environment_name(Some(&locator))
    );
    println!();
    println!("[http]");
    println!("  timeout = {}", config.http.timeout);
    println!("  user_agent = {}", config.http.user_agent);
    println!();
    println!("[logging]");
    println!("  file = {}", config.logging.file.display());

    Ok(())
}
