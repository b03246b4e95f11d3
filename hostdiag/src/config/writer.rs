//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[environment]
; Environment to open by default:
;   public   - Public Cloud
;   fairfax  - Fairfax
;   mooncake - Mooncake
; Any http(s) URL serving a diagnostics document is accepted as well.
default = {}

[http]
; Request timeout in seconds (default: 30)
timeout = {}
; User-Agent header sent with diagnostics requests
user_agent = {}

[logging]
; Log file path (default: ~/.hostdiag/hostdiag.log)
file = {}
"#,
        config.environment.default,
        config.http.timeout,
        config.http.user_agent,
        path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
