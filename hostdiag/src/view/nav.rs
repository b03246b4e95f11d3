//! Extension navigation links.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::diagnostics::{ExtensionEntry, ExtensionInfo};

/// A navigation entry for one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedNavLink {
    /// Id of the extension in the `extensions` map
    pub id: String,
    /// Sort key, the extension name
    pub key: String,
    /// Label shown to the user
    pub name: String,
    /// Link target; extensions are selected in place, so this is empty
    pub url: String,
}

/// Whether an extension entry carries details rather than a last error.
pub fn is_extension_info(entry: Option<&ExtensionEntry>) -> bool {
    matches!(entry, Some(ExtensionEntry::Info(_)))
}

/// Orders links by key.
pub fn by_key(a: &KeyedNavLink, b: &KeyedNavLink) -> Ordering {
    a.key.cmp(&b.key)
}

/// Link for one extension. The id defaults to the name; [`extension_links`]
/// sets it to the map id.
pub fn to_nav_link(info: &ExtensionInfo) -> KeyedNavLink {
    KeyedNavLink {
        id: info.extension_name.clone(),
        key: info.extension_name.clone(),
        name: info.extension_name.clone(),
        url: String::new(),
    }
}

/// Links for every healthy extension, sorted by key.
pub fn extension_links(extensions: &BTreeMap<String, ExtensionEntry>) -> Vec<KeyedNavLink> {
    let mut links: Vec<KeyedNavLink> = extensions
        .iter()
        .filter_map(|(id, entry)| {
            let mut link = to_nav_link(entry.as_info()?);
            link.id = id.clone();
            Some(link)
        })
        .collect();
    links.sort_by(by_key);
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{ExtensionError, LastError};

    fn link(key: &str) -> KeyedNavLink {
        KeyedNavLink {
            id: key.to_string(),
            key: key.to_string(),
            name: key.to_uppercase(),
            url: String::new(),
        }
    }

    fn error_entry() -> ExtensionEntry {
        ExtensionEntry::Error(ExtensionError {
            last_error: LastError {
                error_message: "Test error".to_string(),
                time: "2023-01-01T00:00:00Z".to_string(),
            },
        })
    }

    #[test]
    fn test_is_extension_info() {
        let info = ExtensionEntry::Info(ExtensionInfo::new("test-extension"));

        assert!(is_extension_info(Some(&info)));
        assert!(!is_extension_info(Some(&error_entry())));
        assert!(!is_extension_info(None));
    }

    #[test]
    fn test_by_key() {
        assert_eq!(by_key(&link("a"), &link("b")), Ordering::Less);
        assert_eq!(by_key(&link("b"), &link("a")), Ordering::Greater);
        assert_eq!(by_key(&link("a"), &link("a")), Ordering::Equal);
    }

    #[test]
    fn test_to_nav_link() {
        let mut info = ExtensionInfo::new("test-extension");
        info.config = Some(BTreeMap::from([(
            "key".to_string(),
            serde_json::Value::from("value"),
        )]));

        let expected = KeyedNavLink {
            id: "test-extension".to_string(),
            key: "test-extension".to_string(),
            name: "test-extension".to_string(),
            url: String::new(),
        };
        assert_eq!(to_nav_link(&info), expected);
        assert_eq!(
            to_nav_link(&ExtensionInfo::new("simple-extension")).key,
            "simple-extension"
        );
    }

    #[test]
    fn test_extension_links_skip_errors_and_sort() {
        let extensions = BTreeMap::from([
            (
                "z".to_string(),
                ExtensionEntry::Info(ExtensionInfo::new("websites")),
            ),
            ("broken".to_string(), error_entry()),
            (
                "a".to_string(),
                ExtensionEntry::Info(ExtensionInfo::new("paasserverless")),
            ),
        ]);

        let links = extension_links(&extensions);
        let keys: Vec<&str> = links.iter().map(|l| l.key.as_str()).collect();
        let ids: Vec<&str> = links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(keys, vec!["paasserverless", "websites"]);
        assert_eq!(ids, vec!["a", "z"]);
    }
}
