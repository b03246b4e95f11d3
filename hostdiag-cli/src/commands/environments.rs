//! `hostdiag environments`: list the known diagnostics endpoints.

use hostdiag::config::ConfigFile;
use hostdiag::environment::Environment;
use hostdiag::view::Table;

use crate::error::CliError;
use crate::output::print_table;

/// Run the environments command.
pub fn run() -> Result<(), CliError> {
    let configured = ConfigFile::load()
        .unwrap_or_default()
        .locator()
        .ok();
    print_table(&environments_table(configured.as_deref()));
    Ok(())
}

/// One row per environment; the configured default is starred.
fn environments_table(configured: Option<&str>) -> Table {
    let mut table = Table::new("Environments", &["", "Id", "Name", "URL"]);
    for env in Environment::ALL {
        let marker = if configured == Some(env.url()) { "*" } else { "" };
        table.push(vec![
            marker.to_string(),
            env.id().to_string(),
            env.display_name().to_string(),
            env.url().to_string(),
        ]);
    }
    table
}
