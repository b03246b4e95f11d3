//! Tabular projections of a diagnostics snapshot.
//!
//! Each table is a title, a header row and string rows, ready for either the
//! plain-text printer or the dashboard.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::diagnostics::{BuildInfo, Diagnostics, ServerInfo};

/// Separator for multi-valued cells.
pub const LIST_SEPARATOR: &str = ", ";

/// A titled table of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given column headers.
    pub fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn build_info_table(build_info: &BuildInfo) -> Table {
    let mut table = Table::new("Build Info", &["Name", "Value"]);
    table.push(vec![
        "Build Version".to_string(),
        build_info.build_version.clone(),
    ]);
    table
}

/// Server fields in display order.
pub fn server_info_table(server_info: &ServerInfo) -> Table {
    let mut table = Table::new("Server Info", &["Name", "Value"]);
    let rows = [
        ("Hostname", server_info.hostname.clone()),
        ("Uptime", server_info.uptime.clone()),
        ("Server ID", server_info.server_id.clone()),
        ("Deployment ID", server_info.deployment_id.clone()),
        ("Node Versions", server_info.node_versions.clone()),
        (
            "Extension Sync | Total Sync All Count",
            server_info.extension_sync.total_sync_all_count.clone(),
        ),
    ];
    for (name, value) in rows {
        table.push(vec![name.to_string(), value]);
    }
    table
}

/// Extension configuration as key/value rows.
///
/// String values are shown bare; anything else is shown as JSON.
pub fn configuration_table(config: &BTreeMap<String, Value>) -> Table {
    let mut table = Table::new("Configuration", &["Key", "Value"]);
    for (key, value) in config {
        table.push(vec![key.clone(), render_value(value)]);
    }
    table
}

/// Stage definitions, one row per stage with its steps joined.
pub fn stage_definition_table(stages: &BTreeMap<String, Vec<String>>) -> Table {
    let mut table = Table::new("Stage Definition", &["Key", "Value"]);
    for (stage, steps) in stages {
        table.push(vec![stage.clone(), steps.join(LIST_SEPARATOR)]);
    }
    table
}

/// Extensions that failed to load, with their last error.
pub fn extension_errors_table(diagnostics: &Diagnostics) -> Table {
    let mut table = Table::new("Extension Errors", &["Extension", "Error", "Time"]);
    for (id, last_error) in diagnostics.failed_extensions() {
        table.push(vec![id, last_error.error_message, last_error.time]);
    }
    table
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ExtensionSync;
    use serde_json::json;

    #[test]
    fn test_build_info_table() {
        let table = build_info_table(&BuildInfo {
            build_version: "1.0.0".to_string(),
        });

        assert_eq!(table.headers, vec!["Name", "Value"]);
        assert_eq!(table.rows, vec![vec!["Build Version", "1.0.0"]]);
    }

    #[test]
    fn test_server_info_row_order() {
        let server_info = ServerInfo {
            deployment_id: "deploy-123".to_string(),
            extension_sync: ExtensionSync {
                total_sync_all_count: "42".to_string(),
            },
            hostname: "server.example.com".to_string(),
            node_versions: "v18.17.0".to_string(),
            server_id: "server-456".to_string(),
            uptime: "1234567890".to_string(),
        };

        let table = server_info_table(&server_info);
        let names: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Hostname",
                "Uptime",
                "Server ID",
                "Deployment ID",
                "Node Versions",
                "Extension Sync | Total Sync All Count",
            ]
        );
        assert_eq!(table.rows[1][1], "1234567890");
        assert_eq!(table.rows[5][1], "42");
    }

    #[test]
    fn test_configuration_values() {
        let config = BTreeMap::from([
            ("region".to_string(), json!("westus")),
            ("replicas".to_string(), json!(3)),
            ("flags".to_string(), json!({"beta": true})),
        ]);

        let table = configuration_table(&config);

        assert_eq!(
            table.rows,
            vec![
                vec!["flags", r#"{"beta":true}"#],
                vec!["region", "westus"],
                vec!["replicas", "3"],
            ]
        );
    }

    #[test]
    fn test_stage_steps_are_joined() {
        let stages = BTreeMap::from([
            (
                "build".to_string(),
                vec!["restore".to_string(), "compile".to_string()],
            ),
            ("deploy".to_string(), Vec::new()),
        ]);

        let table = stage_definition_table(&stages);

        assert_eq!(table.rows[0], vec!["build", "restore, compile"]);
        assert_eq!(table.rows[1], vec!["deploy", ""]);
    }

    #[test]
    fn test_extension_errors_table() {
        assert!(extension_errors_table(&Diagnostics::default()).is_empty());

        let diagnostics = Diagnostics::from_value(json!({
            "extensions": {
                "broken": {
                    "lastError": { "errorMessage": "Load failed", "time": "2023-01-01T00:00:00Z" }
                },
                "websites": { "extensionName": "websites" }
            }
        }));

        let table = extension_errors_table(&diagnostics);
        assert_eq!(
            table.rows,
            vec![vec!["broken", "Load failed", "2023-01-01T00:00:00Z"]]
        );
    }
}
