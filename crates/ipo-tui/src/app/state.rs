//! State types for the IPO view

use {
    crate::{config::Settings, tui_log_layer::LogBuffer},
    chrono::{DateTime, Local},
    ipo_api::IpoRecord,
    std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// The data side of the view: records, selection and refresh flag.
///
/// The selection is an index into `records`, so it can never point at a
/// record that is not in the current list.
#[derive(Debug, Default)]
pub struct IpoView {
    records: Vec<IpoRecord>,
    selected: Option<usize>,
    refreshing: Arc<AtomicBool>,
    last_loaded: Option<DateTime<Local>>,
}

impl IpoView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[IpoRecord] {
        &self.records
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&IpoRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn last_loaded(&self) -> Option<DateTime<Local>> {
        self.last_loaded
    }

    /// Replace the whole record list and select the first record
    pub fn apply_records(&mut self, records: Vec<IpoRecord>) {
        self.selected = if records.is_empty() { None } else { Some(0) };
        self.records = records;
        self.last_loaded = Some(Local::now());
    }

    /// Select the first record named `name`, or nothing if there is none
    pub fn select_by_name(&mut self, name: &str) {
        self.selected = self.records.iter().position(|r| r.name() == name);
    }

    /// The records offered in the selector
    pub fn choices(&self, limit: usize) -> &[IpoRecord] {
        &self.records[..self.records.len().min(limit)]
    }

    pub fn select_next(&mut self, limit: usize) {
        let len = self.choices(limit).len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(i) if i < len => i,
            _ => 0,
        });
    }

    pub fn select_prev(&mut self, limit: usize) {
        let len = self.choices(limit).len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i < len => i.saturating_sub(1),
            _ => 0,
        });
    }

    /// Select the `index`-th choice, ignoring out-of-range indices
    pub fn select_choice(&mut self, index: usize, limit: usize) {
        if index < self.choices(limit).len() {
            self.selected = Some(index);
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    /// Mark a refresh as started. Returns `None` if one is already running.
    ///
    /// The flag is cleared when the returned guard is dropped, whichever way
    /// the refresh ends.
    pub fn begin_refresh(&self) -> Option<RefreshGuard> {
        self.refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RefreshGuard {
                flag: Arc::clone(&self.refreshing),
            })
    }
}

/// Clears the refresh flag on drop
#[derive(Debug)]
pub struct RefreshGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Selector, // Left panel with IPO names
    Details,  // Right panel with the selected IPO card
    Logs,     // Bottom panel with diagnostics
}

impl FocusedPanel {
    pub fn next(&self, show_logs: bool) -> Self {
        match self {
            FocusedPanel::Selector => FocusedPanel::Details,
            FocusedPanel::Details if show_logs => FocusedPanel::Logs,
            FocusedPanel::Details | FocusedPanel::Logs => FocusedPanel::Selector,
        }
    }
}

/// Result of the `GET /` health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Unknown,
    Online(String),
    Offline,
}

/// Scroll offsets per panel
#[derive(Debug, Default)]
pub struct ScrollState {
    pub selector: usize, // First selector choice shown
    pub details: usize,
    pub logs: usize,
}

/// Everything the terminal view renders
#[derive(Debug)]
pub struct AppState {
    pub view: IpoView,
    pub settings: Settings,
    pub api_status: ApiStatus,
    pub focused_panel: FocusedPanel,
    pub scroll: ScrollState,
    pub show_logs: bool,
    pub logs: LogBuffer,
    pub should_quit: bool,
    /// Animation tick for the refresh spinner
    pub tick: usize,
}

impl AppState {
    pub fn new(settings: Settings, logs: LogBuffer) -> Self {
        Self {
            view: IpoView::new(),
            settings,
            api_status: ApiStatus::Unknown,
            focused_panel: FocusedPanel::Selector,
            scroll: ScrollState::default(),
            show_logs: true,
            logs,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn selector_limit(&self) -> usize {
        self.settings.selector_limit
    }

    pub fn move_up(&mut self) {
        match self.focused_panel {
            FocusedPanel::Selector => {
                let limit = self.selector_limit();
                self.view.select_prev(limit);
                self.scroll.details = 0;
            },
            FocusedPanel::Details => self.scroll.details = self.scroll.details.saturating_sub(1),
            FocusedPanel::Logs => self.scroll.logs = self.scroll.logs.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        match self.focused_panel {
            FocusedPanel::Selector => {
                let limit = self.selector_limit();
                self.view.select_next(limit);
                self.scroll.details = 0;
            },
            FocusedPanel::Details => {
                let max = self
                    .view
                    .selected_record()
                    .map(|r| r.detail_fields().len().saturating_sub(1))
                    .unwrap_or(0);
                self.scroll.details = (self.scroll.details + 1).min(max);
            },
            FocusedPanel::Logs => {
                let max = self.logs.len().saturating_sub(1);
                self.scroll.logs = (self.scroll.logs + 1).min(max);
            },
        }
    }

    /// Scroll the selector so the selected choice sits within
    /// `visible_rows` rows. A selection past the limit leaves it alone.
    pub fn keep_selection_visible(&mut self, visible_rows: usize) {
        let len = self.view.choices(self.selector_limit()).len();
        let max_scroll = len.saturating_sub(visible_rows);
        if let Some(i) = self.view.selected_index().filter(|i| *i < len) {
            if i < self.scroll.selector {
                self.scroll.selector = i;
            } else if visible_rows > 0 && i >= self.scroll.selector + visible_rows {
                self.scroll.selector = i + 1 - visible_rows;
            }
        }
        self.scroll.selector = self.scroll.selector.min(max_scroll);
    }

    /// Choice index shown on the given visible selector row
    pub fn selector_choice_at(&self, row: usize) -> usize {
        self.scroll.selector + row
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if !self.show_logs && self.focused_panel == FocusedPanel::Logs {
            self.focused_panel = FocusedPanel::Selector;
        }
    }
}
