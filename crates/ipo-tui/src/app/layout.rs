//! Layout calculations for panel areas

use {
    super::state::FocusedPanel,
    ratatui::layout::{Constraint, Direction, Layout, Rect},
};

/// Height of the header panel (borders included)
const HEADER_HEIGHT: u16 = 4;
/// Height of the log panel when shown
const LOGS_HEIGHT: u16 = 8;
/// Height of the footer panel
const FOOTER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelAreas {
    pub header: Rect,
    pub selector: Rect,
    pub details: Rect,
    pub logs: Rect,
    pub footer: Rect,
}

/// Split the terminal into header, selector, details, logs and footer.
/// The logs area is empty when the log panel is hidden.
pub fn calculate_panel_areas(size: Rect, show_logs: bool) -> PanelAreas {
    let constraints: Vec<Constraint> = if show_logs {
        vec![
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(LOGS_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ]
    } else {
        vec![
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Fill(1)])
        .split(chunks[1]);

    PanelAreas {
        header: chunks[0],
        selector: main_chunks[0],
        details: main_chunks[1],
        logs: if show_logs { chunks[2] } else { Rect::default() },
        footer: chunks[chunks.len() - 1],
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    area.width > 0
        && area.height > 0
        && x >= area.x
        && x < area.x + area.width
        && y >= area.y
        && y < area.y + area.height
}

/// Determine which focusable panel is at the given coordinates
pub fn get_panel_at_position(x: u16, y: u16, size: Rect, show_logs: bool) -> Option<FocusedPanel> {
    let areas = calculate_panel_areas(size, show_logs);

    if contains(areas.selector, x, y) {
        Some(FocusedPanel::Selector)
    } else if contains(areas.details, x, y) {
        Some(FocusedPanel::Details)
    } else if show_logs && contains(areas.logs, x, y) {
        Some(FocusedPanel::Logs)
    } else {
        None
    }
}

/// Row index inside the selector list for a click at `y`, if the click
/// landed on a list row rather than the border
pub fn selector_row_at(y: u16, size: Rect, show_logs: bool) -> Option<usize> {
    let selector = calculate_panel_areas(size, show_logs).selector;
    let first_row = selector.y + 1;
    let last_row = (selector.y + selector.height).saturating_sub(1);
    if y >= first_row && y < last_row {
        Some((y - first_row) as usize)
    } else {
        None
    }
}
