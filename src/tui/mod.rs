//! Terminal User Interface for poster-watchlist using ratatui.
//!
//! This module provides the single full-screen poster list with its
//! toolbar, watchlist button and toast notifications.

mod render;
mod state;
mod types;

pub use render::{draw, PosterRow, CHECKMARK};
pub use state::{App, ROW_HEIGHT};
pub use types::{Action, Toast, ToastLength};

use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

/// Poll for terminal events with a timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
