//! Detail card for the selected IPO

use {
    super::utils::{status_color, truncate_to_width},
    crate::app::state::{AppState, FocusedPanel},
    ipo_api::{IpoRecord, field_icon, field_label, format_value, status_category},
    ratatui::{
        Frame,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    },
};

pub fn render_details(f: &mut Frame, app: &AppState, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Details;
    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title("IPO Details");

    let Some(record) = app.view.selected_record() else {
        f.render_widget(block, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    render_card_header(f, record, chunks[0]);
    render_fields(f, record, app.scroll.details, chunks[1]);
}

/// Name on the left, colored status badge on the right
fn render_card_header(f: &mut Frame, record: &IpoRecord, area: Rect) {
    let status = record.status.to_string();
    let category = status_category(record.status_text());
    let badge = format!(" {} ", status);
    let badge_width = badge.chars().count() as u16;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(badge_width)])
        .split(area);

    let name = truncate_to_width(&record.name(), chunks[0].width.saturating_sub(1) as usize);
    let title = Paragraph::new(Line::from(Span::styled(
        name,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, chunks[0]);

    if !status.is_empty() {
        let badge = Paragraph::new(Line::from(Span::styled(
            badge,
            Style::default()
                .fg(Color::Black)
                .bg(status_color(category))
                .add_modifier(Modifier::BOLD),
        )));
        f.render_widget(badge, chunks[1]);
    }
}

fn render_fields(f: &mut Frame, record: &IpoRecord, scroll: usize, area: Rect) {
    let rows: Vec<Row> = record
        .detail_fields()
        .into_iter()
        .skip(scroll)
        .map(|(key, value)| {
            let icon = field_icon(key).map(|i| i.glyph()).unwrap_or(" ");
            Row::new(vec![
                Cell::from(icon).style(Style::default().fg(Color::DarkGray)),
                Cell::from(field_label(key)).style(Style::default().fg(Color::Gray)),
                Cell::from(format_value(key, value))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let table = Table::new(rows, [
        Constraint::Length(2),
        Constraint::Length(22),
        Constraint::Fill(1),
    ])
    .column_spacing(1);
    f.render_widget(table, area);
}
