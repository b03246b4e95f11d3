//! `hostdiag show`: fetch one environment and print it as text.

use clap::{Args, ValueEnum};
use hostdiag::diagnostics::{Diagnostics, ExtensionInfo, PAAS_SERVERLESS, WEBSITES};
use hostdiag::environment::environment_name;
use hostdiag::view::{
    build_info_table, configuration_table, extension_errors_table, extension_links,
    server_info_table, stage_definition_table, Table,
};
use tracing::info;

use super::common::TargetArgs;
use crate::error::CliError;
use crate::output::print_table;
use crate::runner::CliRunner;

/// Section of the diagnostics document to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowTab {
    /// Extension list, or one extension's details with --extension
    Extensions,
    /// Build information
    Build,
    /// Server information
    Server,
    /// Extensions that failed to load
    Errors,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Section to print; prints build, server and extensions when omitted
    #[arg(long, value_enum)]
    pub tab: Option<ShowTab>,

    /// Extension to print in detail (implies --tab extensions)
    #[arg(long)]
    pub extension: Option<String>,
}

/// Run the show command.
pub fn run(args: ShowArgs, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(debug, true)?;
    runner.log_startup("show");

    let locator = runner.locator(args.target.env.as_deref(), args.target.url.as_deref())?;
    let cache = runner.create_cache()?;

    let diagnostics = runner
        .runtime()
        .block_on(cache.get(&locator))
        .map_err(|error| CliError::Fetch {
            environment: locator.clone(),
            error,
        })?;
    cache.log_stats();

    println!(
        "{} - {}",
        environment_name(Some(&locator)),
        diagnostics.build_info().build_version
    );
    println!("{}", locator);
    println!();

    if let Some(id) = args.extension.as_deref() {
        let extension = diagnostics
            .extension_info(id)
            .ok_or_else(|| CliError::ExtensionNotFound(id.to_string()))?;
        info!(extension = id, "Printing extension details");
        for table in extension_tables(&extension) {
            print_table(&table);
        }
        return Ok(());
    }

    for table in tables_for(&diagnostics, args.tab) {
        print_table(&table);
    }
    Ok(())
}

/// Tables printed for a tab, or for the overview when no tab is given.
fn tables_for(diagnostics: &Diagnostics, tab: Option<ShowTab>) -> Vec<Table> {
    match tab {
        Some(ShowTab::Extensions) => vec![extensions_table(diagnostics)],
        Some(ShowTab::Build) => vec![build_info_table(&diagnostics.build_info())],
        Some(ShowTab::Server) => vec![server_info_table(&diagnostics.server_info())],
        Some(ShowTab::Errors) => vec![extension_errors_table(diagnostics)],
        None => vec![
            build_info_table(&diagnostics.build_info()),
            server_info_table(&diagnostics.server_info()),
            extensions_table(diagnostics),
        ],
    }
}

/// Healthy extensions, with the shortcut extensions flagged.
fn extensions_table(diagnostics: &Diagnostics) -> Table {
    let mut table = Table::new("Extensions", &["Extension", "Shortcut"]);
    for link in extension_links(&diagnostics.extensions()) {
        let shortcut = link.id == WEBSITES
            || (link.id == PAAS_SERVERLESS && diagnostics.shows_paas_serverless());
        table.push(vec![
            link.name,
            if shortcut { "yes" } else { "" }.to_string(),
        ]);
    }
    table
}

fn extension_tables(extension: &ExtensionInfo) -> Vec<Table> {
    let mut tables = Vec::new();
    if let Some(config) = &extension.config {
        tables.push(configuration_table(config));
    }
    if let Some(stages) = &extension.stage_definition {
        tables.push(stage_definition_table(stages));
    }
    if tables.is_empty() {
        tables.push(Table::new(&extension.extension_name, &["Key", "Value"]));
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn diagnostics() -> Diagnostics {
        Diagnostics::from_value(json!({
            "extensions": {
                "websites": { "extensionName": "websites" },
                "paasserverless": { "extensionName": "paasserverless" },
                "other": { "extensionName": "other" }
            }
        }))
    }

    #[test]
    fn test_overview_tables() {
        let titles: Vec<String> = tables_for(&diagnostics(), None)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Build Info", "Server Info", "Extensions"]);
    }

    #[test]
    fn test_extensions_flag_shortcuts() {
        let table = extensions_table(&diagnostics());

        assert_eq!(
            table.rows,
            vec![
                vec!["other", ""],
                vec!["paasserverless", "yes"],
                vec!["websites", "yes"],
            ]
        );
    }

    #[test]
    fn test_shortcuts_are_flagged_by_map_id() {
        let diagnostics = Diagnostics::from_value(json!({
            "extensions": {
                "websites": { "extensionName": "App Service" },
                "other": { "extensionName": "websites" }
            }
        }));

        let table = extensions_table(&diagnostics);

        assert_eq!(
            table.rows,
            vec![vec!["App Service", "yes"], vec!["websites", ""]]
        );
    }

    #[test]
    fn test_extension_tables() {
        let mut extension = ExtensionInfo::new(WEBSITES);
        assert_eq!(extension_tables(&extension).len(), 1);

        extension.config = Some(BTreeMap::new());
        extension.stage_definition = Some(BTreeMap::new());
        let titles: Vec<String> = extension_tables(&extension)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Configuration", "Stage Definition"]);
    }
}
