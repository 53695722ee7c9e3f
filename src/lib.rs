//! A terminal poster catalog with a selectable watchlist.
//!
//! poster-watchlist shows a fixed catalog of movie posters in a scrollable
//! list. Rows are toggled with the keyboard or mouse, and the selected
//! titles can be shown as a watchlist notification.
//!
//! # Usage
//!
//! ```bash
//! # Run with the built-in catalog
//! cargo run
//!
//! # Use a custom catalog file
//! cargo run -- --catalog posters.toml
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod selection;
pub mod tui;
pub mod types;
