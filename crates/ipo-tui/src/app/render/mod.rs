//! Rendering for the IPO view

mod details;
mod selector;
pub mod utils;

use {
    super::{
        keys::GLOBAL_HELP,
        layout::calculate_panel_areas,
        state::{ApiStatus, AppState, FocusedPanel},
    },
    ratatui::{
        Frame,
        layout::{Alignment, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, BorderType, Borders, Paragraph},
    },
    utils::spinner,
};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let areas = calculate_panel_areas(f.area(), app.show_logs);

    render_header(f, app, areas.header);
    selector::render_selector(f, app, areas.selector);
    details::render_details(f, app, areas.details);
    if app.show_logs {
        render_logs(f, app, areas.logs);
    }
    render_footer(f, app, areas.footer);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let refresh_button = if app.view.is_refreshing() {
        Span::styled(
            format!("{} Refreshing...", spinner(app.tick)),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(
            "⟳ Refresh Data (r)",
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
    };

    let api_status = match &app.api_status {
        ApiStatus::Unknown => Span::styled("API: checking", Style::default().fg(Color::DarkGray)),
        ApiStatus::Online(_) => Span::styled("API: online", Style::default().fg(Color::Green)),
        ApiStatus::Offline => Span::styled("API: offline", Style::default().fg(Color::Red)),
    };

    let last_loaded = app
        .view
        .last_loaded()
        .map(|t| format!("Updated {}", t.format("%H:%M:%S")))
        .unwrap_or_else(|| "Not loaded yet".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "IPO Details",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            refresh_button,
        ]),
        Line::from(vec![
            api_status,
            Span::styled(
                format!(
                    " | {} ({}) | {}",
                    app.settings.api_url,
                    app.settings.url_source.label(),
                    last_loaded
                ),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(header, area);
}

fn render_logs(f: &mut Frame, app: &AppState, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Logs;
    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let lines = app.logs.snapshot();
    let visible = area.height.saturating_sub(2) as usize;
    // Follow the tail unless the user scrolled up
    let max_start = lines.len().saturating_sub(visible);
    let start = if is_focused {
        app.scroll.logs.min(max_start)
    } else {
        max_start
    };

    let log_lines: Vec<Line> = lines
        .iter()
        .skip(start)
        .take(visible)
        .map(|line| {
            let color = if line.contains("[ERROR]") {
                Color::Red
            } else if line.contains("[WARN]") {
                Color::Yellow
            } else if line.contains("[DEBUG]") || line.contains("[TRACE]") {
                Color::DarkGray
            } else {
                Color::Gray
            };
            Line::from(Span::styled(line.clone(), Style::default().fg(color)))
        })
        .collect();

    let logs = Paragraph::new(log_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!("Logs ({})", lines.len())),
    );
    f.render_widget(logs, area);
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let text = format!(
        "[{}] {} | {}",
        app.focused_panel.name(),
        app.focused_panel.help_text(),
        GLOBAL_HELP
    );
    let footer = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(footer, area);
}
