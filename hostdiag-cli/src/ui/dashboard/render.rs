//! Dashboard rendering.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (3 lines): environment, build version            │
//! ├─────────────────────────────────────────────────────────┤
//! │ Tabs (3 lines)                                          │
//! ├─────────────────────────────────────────────────────────┤
//! │ Body: loading / error / tab content                     │
//! │ EXTENSIONS (30%)     │ DETAILS (70%)                    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Key hints (1 line)                                      │
//! └─────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use hostdiag::diagnostics::Diagnostics;
use hostdiag::view::{
    build_info_table, configuration_table, extension_errors_table, server_info_table,
    stage_definition_table, Table as ViewTable,
};

use super::state::{DashboardState, LoadState, Tab};

/// Render the whole dashboard to the frame.
pub fn render_ui(frame: &mut Frame, state: &DashboardState, spinner: char) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state);
    render_tabs(frame, chunks[1], state.tab());

    match state.load() {
        LoadState::Loading => render_loading(frame, chunks[2], state, spinner),
        LoadState::Failed(error) => render_error(frame, chunks[2], &error.to_string()),
        LoadState::Ready(data) => match state.tab() {
            Tab::Extensions => render_extensions(frame, chunks[2], state),
            Tab::Build => render_tables(frame, chunks[2], &[build_info_table(&data.build_info())]),
            Tab::Server => render_server(frame, chunks[2], data),
        },
    }

    render_hints(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let version = match state.load() {
        LoadState::Ready(data) => data.build_info().build_version,
        _ => "-".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            state.environment_name(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(state.locator(), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
            format!("Build {}", version),
            Style::default().fg(Color::White),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" hostdiag v{} ", hostdiag::VERSION),
            Style::default().fg(Color::Blue),
        ));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, current: Tab) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
    let tabs = Tabs::new(titles)
        .select(current.index())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_loading(frame: &mut Frame, area: Rect, state: &DashboardState, spinner: char) {
    let text = format!(
        "{} Loading diagnostics for {}...",
        spinner,
        state.environment_name()
    );
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press 'r' to retry or 'e' to switch environment."),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Error "));
    frame.render_widget(paragraph, area);
}

fn render_extensions(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let shortcuts = state.shortcuts();
    let items: Vec<ListItem> = state
        .links()
        .into_iter()
        .map(|link| {
            let style = if shortcuts.iter().any(|id| *id == link.id) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(link.name, style))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Extensions "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.selected()));
    frame.render_stateful_widget(list, columns[0], &mut list_state);

    let tables = match state.selected_extension() {
        Some(extension) => {
            let mut tables = Vec::new();
            if let Some(config) = &extension.config {
                tables.push(configuration_table(config));
            }
            if let Some(stages) = &extension.stage_definition {
                tables.push(stage_definition_table(stages));
            }
            tables
        }
        None => Vec::new(),
    };

    if tables.is_empty() {
        let paragraph = Paragraph::new("No details for this extension.")
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        frame.render_widget(paragraph, columns[1]);
    } else {
        render_tables(frame, columns[1], &tables);
    }
}

fn render_server(frame: &mut Frame, area: Rect, data: &Diagnostics) {
    let server = server_info_table(&data.server_info());
    let errors = extension_errors_table(data);
    if errors.is_empty() {
        render_tables(frame, area, &[server]);
    } else {
        render_tables(frame, area, &[server, errors]);
    }
}

/// Stacks tables vertically, each sized to its rows.
fn render_tables(frame: &mut Frame, area: Rect, tables: &[ViewTable]) {
    let constraints: Vec<Constraint> = tables
        .iter()
        .map(|t| Constraint::Length(t.rows.len() as u16 + 3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (table, chunk) in tables.iter().zip(chunks.iter()) {
        frame.render_widget(table_widget(table), *chunk);
    }
}

fn table_widget(table: &ViewTable) -> Table<'static> {
    let columns = table.headers.len().max(1) as u32;
    let widths = vec![Constraint::Ratio(1, columns); columns as usize];

    let header = Row::new(table.headers.clone()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = table.rows.iter().map(|row| Row::new(row.clone())).collect();

    Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} ", table.title),
                Style::default().fg(Color::Blue),
            )),
    )
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" switch tab  "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" select  "),
        Span::styled("p/w", Style::default().fg(Color::Yellow)),
        Span::raw(" shortcuts  "),
        Span::styled("e", Style::default().fg(Color::Yellow)),
        Span::raw(" environment  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" reload  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), area);
}
