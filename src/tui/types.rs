//! TUI type definitions for actions and toasts.

use std::time::{Duration, Instant};

/// Actions that can be returned from the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Toggle selection of a row by index
    ToggleRow(usize),
    /// Show the selected titles
    ShowWatchlist,
    /// Toolbar "Search" item
    Search,
    /// Toolbar "Menu" item
    Menu,
}

/// How long a toast stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLength {
    Short,
    Long,
}

impl ToastLength {
    pub fn duration(self) -> Duration {
        match self {
            ToastLength::Short => Duration::from_millis(2000),
            ToastLength::Long => Duration::from_millis(3500),
        }
    }
}

/// A transient message that disappears on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub length: ToastLength,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, length: ToastLength, now: Instant) -> Self {
        Self {
            message: message.into(),
            length,
            shown_at: now,
        }
    }

    /// Whether the toast should no longer be shown at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.length.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expiry() {
        let start = Instant::now();
        let toast = Toast::new("Search clicked", ToastLength::Short, start);

        assert!(!toast.is_expired(start));
        assert!(!toast.is_expired(start + Duration::from_millis(1999)));
        assert!(toast.is_expired(start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_long_toast_outlives_short() {
        assert!(ToastLength::Long.duration() > ToastLength::Short.duration());

        let start = Instant::now();
        let toast = Toast::new("Watchlist: Dune", ToastLength::Long, start);
        assert!(!toast.is_expired(start + Duration::from_secs(3)));
    }
}
