//! Terminal view: pick an IPO from the list and inspect its details

mod event_loop;
pub mod fetch;
mod keys;
mod layout;
mod render;
pub mod state;

pub use {
    event_loop::run_ipo_tui,
    fetch::{IpoSource, RefreshOutcome},
    state::AppState,
};
