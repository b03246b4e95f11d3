//! Dashboard event loop.
//!
//! Each frame reads the cache for the current environment. A suspended read
//! parks a waiter on the runtime; the cache is read again once the waiter has
//! finished, so the loop never blocks on the network.

use std::time::Duration;

use hostdiag::cache::Read;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::CliError;
use crate::runner::Cache;
use crate::ui::{Dashboard, DashboardEvent, DashboardState};

/// Frame interval while idle.
const TICK: Duration = Duration::from_millis(100);

/// Run the dashboard until the user quits.
pub fn run(runtime: &Runtime, cache: &Cache, locator: String) -> Result<(), CliError> {
    let mut dashboard = Dashboard::new().map_err(CliError::Terminal)?;
    let mut app = App::new(locator);

    // read() spawns fetches on the current runtime.
    let _enter = runtime.enter();

    loop {
        app.refresh(runtime, cache);
        dashboard.draw(&app.state).map_err(CliError::Terminal)?;

        let Some(event) = dashboard.poll_event(TICK).map_err(CliError::Terminal)? else {
            continue;
        };
        if event == DashboardEvent::Quit {
            info!("Dashboard quit requested");
            break;
        }
        app.handle(event, cache);
    }

    dashboard.restore().map_err(CliError::Terminal)?;
    cache.log_stats();
    Ok(())
}

/// Dashboard state plus the read/wait bookkeeping.
struct App {
    state: DashboardState,
    waiter: Option<JoinHandle<()>>,
    settled: bool,
}

impl App {
    fn new(locator: String) -> Self {
        Self {
            state: DashboardState::new(locator),
            waiter: None,
            settled: false,
        }
    }

    /// Reads the cache unless a fetch is still in flight or the state is
    /// already settled.
    fn refresh(&mut self, runtime: &Runtime, cache: &Cache) {
        if self.settled {
            return;
        }
        if let Some(waiter) = &self.waiter {
            if !waiter.is_finished() {
                return;
            }
            self.waiter = None;
        }

        let read = cache.read(self.state.locator());
        let suspended = self.state.apply(&read);
        if let Read::Suspended(pending) = read {
            debug!(environment = pending.environment(), "Waiting for diagnostics");
            self.waiter = Some(runtime.spawn(pending.settled()));
        }
        self.settled = !suspended;
    }

    fn handle(&mut self, event: DashboardEvent, cache: &Cache) {
        match event {
            DashboardEvent::NextEnvironment => {
                cache.clear();
                self.state.next_environment();
                info!(environment = self.state.environment_name(), "Switched environment");
                self.invalidate();
            }
            DashboardEvent::Reload => {
                cache.clear();
                self.state.reset();
                info!(environment = self.state.environment_name(), "Reloading diagnostics");
                self.invalidate();
            }
            DashboardEvent::NextTab => self.state.next_tab(),
            DashboardEvent::PreviousTab => self.state.previous_tab(),
            DashboardEvent::SelectNext => self.state.select_next(),
            DashboardEvent::SelectPrevious => self.state.select_previous(),
            DashboardEvent::Shortcut(id) => {
                self.state.select_extension(id);
            }
            DashboardEvent::Quit => {}
        }
    }

    fn invalidate(&mut self) {
        self.settled = false;
        if let Some(waiter) = self.waiter.take() {
            waiter.abort();
        }
    }
}
