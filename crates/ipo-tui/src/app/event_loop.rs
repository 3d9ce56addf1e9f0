//! Main event loop for the IPO view

use {
    super::{
        fetch::{IpoSource, spawn_load, spawn_refresh, spawn_status_check},
        layout::{get_panel_at_position, selector_row_at},
        render::render,
        state::{AppState, FocusedPanel},
    },
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    ratatui::{Terminal, backend::CrosstermBackend, layout::Rect},
    std::{io, sync::Arc, time::Duration},
    tokio::sync::Mutex as TokioMutex,
    tracing::info,
};

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What a key press asks the loop to do besides updating state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Refresh,
    Quit,
}

/// Apply a key press to the state
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            Action::Quit
        },
        KeyCode::Char('r') => {
            if app.view.is_refreshing() {
                Action::None
            } else {
                Action::Refresh
            }
        },
        KeyCode::Char('l') => {
            app.toggle_logs();
            Action::None
        },
        KeyCode::Tab => {
            app.focused_panel = app.focused_panel.next(app.show_logs);
            Action::None
        },
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_up();
            Action::None
        },
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_down();
            Action::None
        },
        KeyCode::Home if app.focused_panel == FocusedPanel::Selector => {
            let limit = app.selector_limit();
            app.view.select_choice(0, limit);
            app.scroll.details = 0;
            Action::None
        },
        KeyCode::End if app.focused_panel == FocusedPanel::Selector => {
            let limit = app.selector_limit();
            let last = app.view.choices(limit).len().saturating_sub(1);
            app.view.select_choice(last, limit);
            app.scroll.details = 0;
            Action::None
        },
        _ => Action::None,
    }
}

/// Apply a left click at (x, y) on a terminal of the given size
pub fn handle_click(app: &mut AppState, x: u16, y: u16, size: Rect) {
    let Some(panel) = get_panel_at_position(x, y, size, app.show_logs) else {
        return;
    };
    app.focused_panel = panel;
    if panel == FocusedPanel::Selector
        && let Some(row) = selector_row_at(y, size, app.show_logs)
    {
        let limit = app.selector_limit();
        let choice = app.selector_choice_at(row);
        app.view.select_choice(choice, limit);
        app.scroll.details = 0;
    }
}

pub async fn run_ipo_tui(
    mut terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app_state: Arc<TokioMutex<AppState>>,
    source: Arc<dyn IpoSource>,
) -> anyhow::Result<()> {
    info!("Loading IPO data...");
    spawn_status_check(Arc::clone(&app_state), Arc::clone(&source));
    spawn_load(Arc::clone(&app_state), Arc::clone(&source));

    loop {
        let size = {
            let mut app = app_state.lock().await;
            app.tick = app.tick.wrapping_add(1);
            let completed = terminal.draw(|f| render(f, &mut app))?;
            completed.area
        };

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let action = {
            let mut app = app_state.lock().await;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&mut app, key),
                Event::Mouse(mouse) => {
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            handle_click(&mut app, mouse.column, mouse.row, size)
                        },
                        MouseEventKind::ScrollUp => app.move_up(),
                        MouseEventKind::ScrollDown => app.move_down(),
                        _ => {},
                    }
                    Action::None
                },
                _ => Action::None,
            }
        };

        match action {
            Action::Quit => break,
            Action::Refresh => {
                spawn_refresh(Arc::clone(&app_state), Arc::clone(&source));
            },
            Action::None => {},
        }
    }

    info!("Exiting IPO view");
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            app::state::tests::{record, settings},
            tui_log_layer::LogBuffer,
        },
        ipo_api::IpoRecord,
        crossterm::event::KeyModifiers,
        ratatui::backend::TestBackend,
    };

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app() -> AppState {
        let mut app = AppState::new(settings(10), LogBuffer::new());
        app.view.apply_records(vec![
            record("Alpha", "Active"),
            record("Beta", "Close"),
            record("Gamma", "Upcoming"),
        ]);
        app
    }

    #[test]
    fn arrows_move_selection() {
        let mut app = loaded_app();
        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.view.selected_index(), Some(1));
        handle_key(&mut app, press(KeyCode::End));
        assert_eq!(app.view.selected_index(), Some(2));
        handle_key(&mut app, press(KeyCode::Up));
        handle_key(&mut app, press(KeyCode::Home));
        assert_eq!(app.view.selected_index(), Some(0));
    }

    #[test]
    fn refresh_key_is_ignored_while_refreshing() {
        let mut app = loaded_app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('r'))), Action::Refresh);
        let _guard = app.view.begin_refresh().expect("starts");
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('r'))), Action::None);
    }

    #[test]
    fn quit_and_toggle_logs() {
        let mut app = loaded_app();
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert!(!app.show_logs);
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn click_on_selector_row_selects_it() {
        let mut app = loaded_app();
        let size = Rect::new(0, 0, 100, 40);
        app.focused_panel = FocusedPanel::Details;
        // Header is 4 rows high, the list starts one row below the border
        handle_click(&mut app, 3, 7, size);
        assert_eq!(app.focused_panel, FocusedPanel::Selector);
        assert_eq!(app.view.selected_index(), Some(2));

        handle_click(&mut app, 80, 10, size);
        assert_eq!(app.focused_panel, FocusedPanel::Details);
        assert_eq!(app.view.selected_index(), Some(2));
    }

    #[test]
    fn click_on_scrolled_selector_picks_the_row_shown() {
        let mut app = AppState::new(settings(30), LogBuffer::new());
        app.view.apply_records(
            (0..30)
                .map(|i| record(&format!("R{:02}", i), "Active"))
                .collect(),
        );
        app.view.select_by_name("R29");

        let size = Rect::new(0, 0, 100, 30);
        let mut terminal = Terminal::new(TestBackend::new(size.width, size.height))
            .expect("test terminal");
        terminal.draw(|f| render(f, &mut app)).expect("draw");

        // First list row sits just below the selector's top border
        let first_row: String = (0..30)
            .map(|x: u16| terminal.backend().buffer()[(x, 5u16)].symbol().to_string())
            .collect();
        assert!(first_row.contains("R17"));

        handle_click(&mut app, 3, 5, size);
        assert_eq!(
            app.view.selected_record().map(IpoRecord::name).as_deref(),
            Some("R17")
        );
    }
}
