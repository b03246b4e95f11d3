//! Presentation helpers shared by the text output and the dashboard.

mod nav;
mod tables;

pub use nav::{by_key, extension_links, is_extension_info, to_nav_link, KeyedNavLink};
pub use tables::{
    build_info_table, configuration_table, extension_errors_table, server_info_table,
    stage_definition_table, Table, LIST_SEPARATOR,
};
