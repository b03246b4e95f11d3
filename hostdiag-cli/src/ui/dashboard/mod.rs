//! Interactive diagnostics dashboard.
//!
//! # Module Structure
//!
//! - `state` - Tabs, selection and load state (no rendering dependencies)
//! - `render` - Layout and widgets

mod render;
pub mod state;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hostdiag::diagnostics::{PAAS_SERVERLESS, WEBSITES};
use ratatui::{backend::CrosstermBackend, Terminal};

pub use state::{DashboardEvent, DashboardState, LoadState, SPINNER_FRAMES};

/// The terminal side of the dashboard.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Spinner frame index for the loading animation.
    spinner_frame: usize,
}

impl Dashboard {
    /// Takes over the terminal (raw mode, alternate screen).
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            spinner_frame: 0,
        })
    }

    /// Restore terminal to normal state.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Draw the dashboard for the given state.
    pub fn draw(&mut self, state: &DashboardState) -> io::Result<()> {
        if matches!(state.load(), LoadState::Loading) {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
        let spinner = SPINNER_FRAMES[self.spinner_frame];

        self.terminal.draw(|frame| {
            render::render_ui(frame, state, spinner);
        })?;
        Ok(())
    }

    /// Wait up to `timeout` for a key press.
    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<DashboardEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }

        let event = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(DashboardEvent::Quit)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(DashboardEvent::Quit),
            KeyCode::Char('e') | KeyCode::Char('E') => Some(DashboardEvent::NextEnvironment),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(DashboardEvent::Reload),
            KeyCode::Tab | KeyCode::Right => Some(DashboardEvent::NextTab),
            KeyCode::BackTab | KeyCode::Left => Some(DashboardEvent::PreviousTab),
            KeyCode::Down | KeyCode::Char('j') => Some(DashboardEvent::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(DashboardEvent::SelectPrevious),
            KeyCode::Char('p') => Some(DashboardEvent::Shortcut(PAAS_SERVERLESS)),
            KeyCode::Char('w') => Some(DashboardEvent::Shortcut(WEBSITES)),
            _ => None,
        };
        Ok(event)
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
