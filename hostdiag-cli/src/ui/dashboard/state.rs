//! State types for the dashboard.
//!
//! These types are independent of rendering and can be tested in isolation.

use std::sync::Arc;

use hostdiag::cache::Read;
use hostdiag::diagnostics::{Diagnostics, ExtensionInfo, PAAS_SERVERLESS, WEBSITES};
use hostdiag::environment::{environment_name, Environment};
use hostdiag::fetch::FetchError;
use hostdiag::view::{extension_links, KeyedNavLink};

/// Spinner animation frames.
pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Events that can occur in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    /// User requested quit ('q', Esc or Ctrl+C).
    Quit,
    /// Switch to the next known environment.
    NextEnvironment,
    /// Drop cached data and fetch again.
    Reload,
    NextTab,
    PreviousTab,
    SelectNext,
    SelectPrevious,
    /// Jump to a shortcut extension.
    Shortcut(&'static str),
}

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Extensions,
    Build,
    Server,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Extensions, Tab::Build, Tab::Server];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Extensions => "Extensions",
            Tab::Build => "Build Information",
            Tab::Server => "Server Information",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Extensions => 0,
            Tab::Build => 1,
            Tab::Server => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the cache last returned for the current environment.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Arc<Diagnostics>),
    Failed(Arc<FetchError>),
}

/// Everything the renderer needs, apart from the terminal.
#[derive(Debug, Clone)]
pub struct DashboardState {
    locator: String,
    tab: Tab,
    selected: usize,
    load: LoadState,
}

impl DashboardState {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            tab: Tab::default(),
            selected: 0,
            load: LoadState::Loading,
        }
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn environment_name(&self) -> &'static str {
        environment_name(Some(&self.locator))
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    /// Index of the selected extension link.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Records a cache read. Returns whether the read suspended.
    pub fn apply(&mut self, read: &Read) -> bool {
        match read {
            Read::Ready(data) => {
                let first = !matches!(self.load, LoadState::Ready(_));
                self.load = LoadState::Ready(Arc::clone(data));
                if first {
                    self.select_default();
                }
                false
            }
            Read::Failed(error) => {
                self.load = LoadState::Failed(Arc::clone(error));
                false
            }
            Read::Suspended(_) => {
                self.load = LoadState::Loading;
                true
            }
        }
    }

    /// Moves to the environment after the current one.
    ///
    /// A custom URL moves to the first known environment.
    pub fn next_environment(&mut self) {
        let next = Environment::from_url(&self.locator)
            .map(|env| env.next())
            .unwrap_or_default();
        self.set_locator(next.url());
    }

    pub fn set_locator(&mut self, locator: &str) {
        self.locator = locator.to_string();
        self.reset();
    }

    /// Forgets loaded data, keeping the environment and tab.
    pub fn reset(&mut self) {
        self.load = LoadState::Loading;
        self.selected = 0;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
    }

    /// Extension navigation links of the loaded snapshot.
    pub fn links(&self) -> Vec<KeyedNavLink> {
        match &self.load {
            LoadState::Ready(data) => extension_links(&data.extensions()),
            _ => Vec::new(),
        }
    }

    pub fn select_next(&mut self) {
        let count = self.links().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Selects an extension by its map id; returns false if it is not listed.
    pub fn select_extension(&mut self, id: &str) -> bool {
        match self.links().iter().position(|link| link.id == id) {
            Some(index) => {
                self.selected = index;
                self.tab = Tab::Extensions;
                true
            }
            None => false,
        }
    }

    /// Details of the selected extension.
    pub fn selected_extension(&self) -> Option<ExtensionInfo> {
        let LoadState::Ready(data) = &self.load else {
            return None;
        };
        let link = self.links().into_iter().nth(self.selected)?;
        data.extension_info(&link.id)
    }

    /// Map ids of the shortcut extensions available in the loaded snapshot.
    pub fn shortcuts(&self) -> Vec<&'static str> {
        match &self.load {
            LoadState::Ready(data) if data.shows_paas_serverless() => {
                vec![PAAS_SERVERLESS, WEBSITES]
            }
            LoadState::Ready(_) => vec![WEBSITES],
            _ => Vec::new(),
        }
    }

    /// Initial selection: the serverless shortcut when healthy, else websites.
    fn select_default(&mut self) {
        self.selected = 0;
        if let Some(first) = self.shortcuts().first() {
            let tab = self.tab;
            self.select_extension(first);
            self.tab = tab;
        }
    }
}
