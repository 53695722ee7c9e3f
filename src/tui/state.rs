//! Application state management and input handling.

use crate::catalog::Catalog;
use crate::config::{ColorScheme, Config, Keybindings};
use crate::selection::SelectionList;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use super::types::{Action, Toast, ToastLength};

/// Terminal lines used by one poster row.
pub const ROW_HEIGHT: u16 = 3;

/// Application state for the TUI.
pub struct App {
    /// Posters shown by the list
    pub catalog: Catalog,
    /// Selection controller over the catalog
    pub list: SelectionList,
    /// Cursor and scroll offset of the list
    pub list_state: ListState,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether help modal is shown
    pub show_help: bool,
    /// Transient message, if any
    pub toast: Option<Toast>,
    /// Custom keybindings
    pub keybindings: Keybindings,
    /// Color scheme
    pub colors: ColorScheme,
    /// Whether mouse clicks are handled
    pub mouse: bool,
    /// Inner area of the list from the last draw
    pub list_area: Rect,
    /// Watchlist button from the last draw, if it was shown
    pub watchlist_area: Option<Rect>,
    /// Toolbar "Search" item from the last draw
    pub search_area: Rect,
    /// Toolbar "Menu" item from the last draw
    pub menu_area: Rect,
    watchlist_visible: Rc<Cell<bool>>,
    needs_redraw: bool,
}

impl App {
    /// Create the app over `catalog` with nothing selected.
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        let watchlist_visible = Rc::new(Cell::new(false));
        let visible = Rc::clone(&watchlist_visible);
        let list = SelectionList::new(
            catalog.records(),
            Box::new(move |count| {
                debug!("Selection changed: {} selected", count);
                visible.set(count > 0);
            }),
        );

        let mut list_state = ListState::default();
        if !catalog.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            catalog,
            list,
            list_state,
            should_quit: false,
            show_help: false,
            toast: None,
            keybindings: config.keybindings.clone(),
            colors: config.colors.clone(),
            mouse: config.mouse,
            list_area: Rect::default(),
            watchlist_area: None,
            search_area: Rect::default(),
            menu_area: Rect::default(),
            watchlist_visible,
            needs_redraw: true,
        }
    }

    /// Whether the watchlist button is shown.
    pub fn watchlist_visible(&self) -> bool {
        self.watchlist_visible.get()
    }

    /// Row under the cursor.
    pub fn cursor(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Toggle a rendered row. Out-of-range rows are logged and ignored.
    pub fn toggle_row(&mut self, index: usize) {
        match self.list.toggle_row(index) {
            Ok(count) => debug!("Row {} toggled, {} selected", index, count),
            Err(e) => debug!("Ignoring toggle: {}", e),
        }
    }

    /// Show the selected titles in catalog order. Selection is kept.
    pub fn show_watchlist(&mut self, now: Instant) {
        if !self.watchlist_visible() {
            return;
        }
        let message = self.catalog.watchlist_message(self.list.selected_indices());
        info!("{}", message);
        self.show_toast(message, ToastLength::Long, now);
    }

    /// Replace the current toast.
    pub fn show_toast(&mut self, message: impl Into<String>, length: ToastLength, now: Instant) {
        self.toast = Some(Toast::new(message, length, now));
        self.needs_redraw = true;
    }

    /// Apply an action produced by input handling.
    pub fn perform(&mut self, action: Action, now: Instant) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::ToggleRow(index) => self.toggle_row(index),
            Action::ShowWatchlist => self.show_watchlist(now),
            Action::Search => self.show_toast("Search clicked", ToastLength::Short, now),
            Action::Menu => self.show_toast("Menu clicked", ToastLength::Short, now),
        }
    }

    /// Drop an expired toast.
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
            self.needs_redraw = true;
        }
    }

    /// Request a redraw on the next loop iteration.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Whether anything changed since the last draw. Clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        let toggled = !self.list.take_invalidated_rows().is_empty();
        let dirty = self.needs_redraw || toggled;
        self.needs_redraw = false;
        dirty
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        self.needs_redraw = true;

        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        // Handle help modal
        if self.show_help {
            if key.code == KeyCode::Esc
                || self.keybindings.matches(&self.keybindings.help, &key)
                || self.keybindings.matches(&self.keybindings.quit, &key)
            {
                self.show_help = false;
            }
            return Action::None;
        }

        let kb = &self.keybindings;
        if kb.matches(&kb.help, &key) {
            self.show_help = true;
            Action::None
        } else if kb.matches(&kb.up, &key) {
            self.move_cursor(-1);
            Action::None
        } else if kb.matches(&kb.down, &key) {
            self.move_cursor(1);
            Action::None
        } else if kb.matches(&kb.page_up, &key) {
            self.move_cursor(-self.page_size());
            Action::None
        } else if kb.matches(&kb.page_down, &key) {
            self.move_cursor(self.page_size());
            Action::None
        } else if kb.matches(&kb.top, &key) {
            self.move_cursor(isize::MIN);
            Action::None
        } else if kb.matches(&kb.bottom, &key) {
            self.move_cursor(isize::MAX);
            Action::None
        } else if kb.matches(&kb.toggle, &key) {
            match self.cursor() {
                Some(i) => Action::ToggleRow(i),
                None => Action::None,
            }
        } else if kb.matches(&kb.watchlist, &key) {
            if self.watchlist_visible() {
                Action::ShowWatchlist
            } else {
                Action::None
            }
        } else if kb.matches(&kb.search, &key) {
            Action::Search
        } else if kb.matches(&kb.menu, &key) {
            Action::Menu
        } else if kb.matches(&kb.quit, &key) {
            self.should_quit = true;
            Action::Quit
        } else {
            Action::None
        }
    }

    /// Handle mouse input and return an action.
    ///
    /// Positions are hit-tested against the areas recorded by the last draw.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if !self.mouse || self.show_help {
            return Action::None;
        }

        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.needs_redraw = true;
                self.move_cursor(-1);
                Action::None
            }
            MouseEventKind::ScrollDown => {
                self.needs_redraw = true;
                self.move_cursor(1);
                Action::None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.needs_redraw = true;
                if self.watchlist_area.is_some_and(|a| a.contains(pos)) {
                    Action::ShowWatchlist
                } else if self.search_area.contains(pos) {
                    Action::Search
                } else if self.menu_area.contains(pos) {
                    Action::Menu
                } else if self.list_area.contains(pos) {
                    self.row_under(pos)
                } else {
                    Action::None
                }
            }
            _ => Action::None,
        }
    }

    /// Map a click inside the list area to a row toggle.
    ///
    /// The list only draws rows that fit completely, so clicks on the blank
    /// lines below the last drawn row are ignored.
    fn row_under(&mut self, pos: Position) -> Action {
        let slot = (pos.y - self.list_area.y) / ROW_HEIGHT;
        if slot >= self.list_area.height / ROW_HEIGHT {
            debug!("Click below the last drawn row");
            return Action::None;
        }

        let index = self.list_state.offset() + usize::from(slot);
        if index >= self.list.row_count() {
            debug!("Click below the last poster");
            return Action::None;
        }

        self.list_state.select(Some(index));
        Action::ToggleRow(index)
    }

    /// Number of rows that fit in the list area.
    fn page_size(&self) -> isize {
        (self.list_area.height / ROW_HEIGHT).max(1) as isize
    }

    fn move_cursor(&mut self, delta: isize) {
        let count = self.list.row_count();
        if count == 0 {
            return;
        }
        let current = self.cursor().unwrap_or(0);
        let target = current.saturating_add_signed(delta).min(count - 1);
        self.list_state.select(Some(target));
    }
}
