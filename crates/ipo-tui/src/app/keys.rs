//! Key bindings organized by panel
//!
//! ## Panel-specific keys:
//! - **Selector**: ↑/↓ to pick an IPO, Home/End for first/last choice
//! - **Details**: ↑/↓ to scroll the card
//! - **Logs**: ↑/↓ to scroll
//! - **All panels**: r to refresh, l to toggle logs, Tab to switch panels, q to quit

use super::state::FocusedPanel;

impl FocusedPanel {
    /// Returns a short help string for display in the footer
    pub fn help_text(&self) -> &'static str {
        match self {
            FocusedPanel::Selector => "↑/↓: Select IPO | Home/End: First/Last",
            FocusedPanel::Details => "↑/↓: Scroll",
            FocusedPanel::Logs => "↑/↓: Scroll",
        }
    }

    /// Returns the panel name for display
    pub fn name(&self) -> &'static str {
        match self {
            FocusedPanel::Selector => "IPOs",
            FocusedPanel::Details => "Details",
            FocusedPanel::Logs => "Logs",
        }
    }
}

/// Keys available everywhere
pub const GLOBAL_HELP: &str = "r: Refresh | l: Logs | Tab: Switch panel | q: Quit";
