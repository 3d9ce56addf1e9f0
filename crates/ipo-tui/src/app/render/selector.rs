//! IPO selector list

use {
    super::utils::{status_color, truncate_to_width},
    crate::app::state::{AppState, FocusedPanel},
    ipo_api::status_category,
    ratatui::{
        Frame,
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    },
};

pub fn render_selector(f: &mut Frame, app: &mut AppState, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Selector;
    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let total = app.view.records().len();
    let choices = app.view.choices(app.selector_limit());
    let title = if choices.len() < total {
        format!("IPOs ({} of {})", choices.len(), total)
    } else {
        format!("IPOs ({})", total)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(title);

    if choices.is_empty() {
        let empty = Paragraph::new("No IPO data loaded")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let visible_rows = area.height.saturating_sub(2) as usize;
    app.keep_selection_visible(visible_rows);
    let scroll = app.scroll.selector;
    let choices = app.view.choices(app.selector_limit());

    let name_width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = choices
        .iter()
        .skip(scroll)
        .take(visible_rows)
        .map(|record| {
            let category = status_category(record.status_text());
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(status_color(category))),
                Span::raw(truncate_to_width(&record.name(), name_width)),
            ]))
        })
        .collect();

    // A record selected by name can sit past the selector limit
    let selected = app
        .view
        .selected_index()
        .filter(|i| *i < choices.len())
        .map(|i| i - scroll);
    let mut state = ListState::default().with_selected(selected);

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .highlight_symbol("▸");
    f.render_stateful_widget(list, area, &mut state);
}
