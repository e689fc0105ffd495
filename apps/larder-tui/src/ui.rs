//! Rendering of the item table, the add/edit form, and the status line

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use larder_core::table;

use crate::app::{App, Focus, FIELD_LABELS};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                         // Title
            Constraint::Min(4),                            // Item table
            Constraint::Length(FIELD_LABELS.len() as u16 + 2), // Form
            Constraint::Length(1),                         // Status line
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_table(frame, app, chunks[1]);
    render_form(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Larder - Food Storage Tracker")
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        "Name",
        "Description",
        "Storage",
        "Stored",
        "Use By",
        "Days Left",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = table::rows(&app.items).into_iter().map(|row| {
        Row::new(vec![
            row.name,
            row.description,
            row.storage_type,
            row.date_stored,
            row.use_by_date,
            row.days_left,
        ])
    });

    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(28),
        Constraint::Percentage(12),
        Constraint::Percentage(14),
        Constraint::Percentage(14),
        Constraint::Percentage(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Items"))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select((!app.items.is_empty()).then_some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = FIELD_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let focused = app.focus == Focus::Form && app.field_index == i;
            let marker = if focused { "> " } else { "  " };
            let style = if focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{label}: "), style),
                Span::raw(app.field_value(i).to_string()),
            ])
        })
        .collect();

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.form.submit_label()),
    );
    frame.render_widget(form, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.focus {
        Focus::Table => "a add | e edit | d delete | r refresh | q quit",
        Focus::Form => "Enter submit | Tab next field | Esc cancel",
    };
    let message = app.status.as_deref().unwrap_or("");

    let status = Line::from(vec![
        Span::raw(message.to_string()),
        Span::raw("  "),
        Span::styled(hints, Style::default().add_modifier(Modifier::DIM)),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}
