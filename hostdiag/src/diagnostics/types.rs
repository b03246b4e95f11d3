//! Payload types for the `/api/diagnostics` document.
//!
//! [`Diagnostics`] holds the parsed document exactly as the host sent it, so
//! keys this crate does not know about survive and nothing is defaulted in.
//! Any valid JSON is accepted; only malformed JSON is rejected.
//!
//! The typed sections ([`BuildInfo`], [`ServerInfo`], [`ExtensionEntry`]) are
//! display projections built on demand. Field names follow the wire format
//! (camelCase). A field that is missing or `null` projects to an empty
//! string, strings project bare and any other value projects as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extension id of the serverless host, shown as a shortcut when healthy.
pub const PAAS_SERVERLESS: &str = "paasserverless";

/// Extension id of the websites host, always offered as a shortcut.
pub const WEBSITES: &str = "websites";

/// A complete diagnostics snapshot for one environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    document: Value,
}

impl Diagnostics {
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    /// The document as received.
    pub fn as_value(&self) -> &Value {
        &self.document
    }

    pub fn into_value(self) -> Value {
        self.document
    }

    fn section(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Build metadata of the host.
    pub fn build_info(&self) -> BuildInfo {
        let section = self.section("buildInfo");
        BuildInfo {
            build_version: field_text(section, "buildVersion"),
        }
    }

    /// Runtime metadata of the serving instance.
    pub fn server_info(&self) -> ServerInfo {
        let section = self.section("serverInfo");
        ServerInfo {
            deployment_id: field_text(section, "deploymentId"),
            extension_sync: ExtensionSync {
                total_sync_all_count: field_text(
                    section.and_then(|s| s.get("extensionSync")),
                    "totalSyncAllCount",
                ),
            },
            hostname: field_text(section, "hostname"),
            node_versions: field_text(section, "nodeVersions"),
            server_id: field_text(section, "serverId"),
            uptime: field_text(section, "uptime"),
        }
    }

    /// Extension id -> details, or the last error the extension reported.
    ///
    /// Values that carry neither shape are left out.
    pub fn extensions(&self) -> BTreeMap<String, ExtensionEntry> {
        match self.section("extensions").and_then(Value::as_object) {
            Some(extensions) => extensions
                .iter()
                .filter_map(|(id, value)| Some((id.clone(), ExtensionEntry::from_value(value)?)))
                .collect(),
            None => BTreeMap::new(),
        }
    }

    /// Returns the details of a healthy extension, looked up by map id.
    ///
    /// Extensions that only carry a last-error record yield `None`.
    pub fn extension_info(&self, id: &str) -> Option<ExtensionInfo> {
        let value = self.section("extensions")?.get(id)?;
        match ExtensionEntry::from_value(value)? {
            ExtensionEntry::Info(info) => Some(info),
            ExtensionEntry::Error(_) => None,
        }
    }

    /// Whether the serverless shortcut should be offered.
    pub fn shows_paas_serverless(&self) -> bool {
        self.extension_info(PAAS_SERVERLESS).is_some()
    }

    /// Extensions that reported an error, in id order.
    pub fn failed_extensions(&self) -> Vec<(String, LastError)> {
        self.extensions()
            .into_iter()
            .filter_map(|(id, entry)| match entry {
                ExtensionEntry::Error(error) => Some((id, error.last_error)),
                ExtensionEntry::Info(_) => None,
            })
            .collect()
    }
}

impl From<Value> for Diagnostics {
    fn from(document: Value) -> Self {
        Self::from_value(document)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildInfo {
    pub build_version: String,
}

/// Runtime metadata of the instance that served the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    pub deployment_id: String,
    pub extension_sync: ExtensionSync,
    pub hostname: String,
    pub node_versions: String,
    pub server_id: String,
    /// Process uptime as reported by the host
    pub uptime: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSync {
    pub total_sync_all_count: String,
}

/// One value of the `extensions` map.
///
/// The host reports either the extension's details or, when the extension
/// failed to load, its last error. The two shapes are told apart by their
/// keys (`extensionName` vs `lastError`).
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionEntry {
    Info(ExtensionInfo),
    Error(ExtensionError),
}

impl ExtensionEntry {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.contains_key("extensionName") {
            return Some(ExtensionEntry::Info(ExtensionInfo::from_object(object)));
        }
        let last_error = object.get("lastError")?;
        Some(ExtensionEntry::Error(ExtensionError {
            last_error: LastError {
                error_message: field_text(Some(last_error), "errorMessage"),
                time: field_text(Some(last_error), "time"),
            },
        }))
    }

    pub fn as_info(&self) -> Option<&ExtensionInfo> {
        match self {
            ExtensionEntry::Info(info) => Some(info),
            ExtensionEntry::Error(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionInfo {
    pub extension_name: String,
    /// Configuration key/value pairs; values are usually strings
    pub config: Option<BTreeMap<String, Value>>,
    /// Stage name -> ordered list of stage steps
    pub stage_definition: Option<BTreeMap<String, Vec<String>>>,
}

impl ExtensionInfo {
    pub fn new(extension_name: impl Into<String>) -> Self {
        Self {
            extension_name: extension_name.into(),
            config: None,
            stage_definition: None,
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let config = object.get("config").and_then(Value::as_object).map(|config| {
            config
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        });
        let stage_definition = object
            .get("stageDefinition")
            .and_then(Value::as_object)
            .map(|stages| {
                stages
                    .iter()
                    .map(|(stage, steps)| {
                        let steps = match steps {
                            Value::Array(steps) => steps.iter().map(display_text).collect(),
                            Value::Null => Vec::new(),
                            other => vec![display_text(other)],
                        };
                        (stage.clone(), steps)
                    })
                    .collect()
            });

        Self {
            extension_name: object.get("extensionName").map(display_text).unwrap_or_default(),
            config,
            stage_definition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionError {
    pub last_error: LastError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub error_message: String,
    pub time: String,
}

/// Display text of a JSON value: strings bare, `null` empty, the rest as JSON.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn field_text(section: Option<&Value>, key: &str) -> String {
    section
        .and_then(|section| section.get(key))
        .map(display_text)
        .unwrap_or_default()
}
