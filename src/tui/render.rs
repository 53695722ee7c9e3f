//! UI rendering functions for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::state::App;
use crate::config::ColorScheme;
use crate::selection::PosterView;
use crate::types::PosterRecord;

/// Glyph drawn next to selected rows.
pub const CHECKMARK: &str = "✔";

/// Builds the list item for one poster row.
pub struct PosterRow<'a> {
    colors: &'a ColorScheme,
    item: Option<ListItem<'static>>,
}

impl<'a> PosterRow<'a> {
    pub fn new(colors: &'a ColorScheme) -> Self {
        Self { colors, item: None }
    }

    /// The item built by the last `bind`.
    pub fn into_item(self) -> Option<ListItem<'static>> {
        self.item
    }
}

impl PosterView for PosterRow<'_> {
    fn bind(&mut self, poster: &PosterRecord, is_selected: bool) {
        let (bg, marker) = if is_selected {
            (self.colors.selected_bg(), CHECKMARK)
        } else {
            (self.colors.default_bg(), " ")
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(marker, Style::default().fg(self.colors.checkmark())),
                Span::raw(" "),
                Span::styled(
                    poster.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("rating {}", poster.rating),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    poster.image.to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::raw(poster.author.clone()),
            ]),
            Line::from(Span::styled(
                format!("  {}", poster.description),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ];

        self.item = Some(ListItem::new(lines).style(Style::default().bg(bg)));
    }
}

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let button_height = if app.watchlist_visible() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Toolbar
            Constraint::Min(0),                // Poster list
            Constraint::Length(button_height), // Watchlist button
            Constraint::Length(3),             // Footer
        ])
        .split(size);

    draw_toolbar(frame, app, chunks[0]);
    draw_poster_list(frame, app, chunks[1]);

    if app.watchlist_visible() {
        draw_watchlist_button(frame, app, chunks[2]);
        app.watchlist_area = Some(chunks[2]);
    } else {
        app.watchlist_area = None;
    }

    draw_footer(frame, app, chunks[3]);

    if let Some(toast) = &app.toast {
        draw_toast(frame, &toast.message, chunks[1]);
    }

    if app.show_help {
        draw_help_modal(frame, app);
    }
}

fn draw_toolbar(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(16),
            Constraint::Length(14),
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Movie Posters",
            Style::default()
                .fg(app.colors.accent())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{} posters]", app.list.row_count()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(title, cells[0]);

    let kb = &app.keybindings;
    let search = Paragraph::new(format!("[{}] Search", key_label(&kb.search)))
        .style(Style::default().fg(Color::Cyan));
    let menu = Paragraph::new(format!("[{}] Menu", key_label(&kb.menu)))
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(search, cells[1]);
    frame.render_widget(menu, cells[2]);

    app.search_area = cells[1];
    app.menu_area = cells[2];
}

fn draw_poster_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Posters")
        .border_style(Style::default().fg(app.colors.accent()));
    app.list_area = block.inner(area);

    if app.list.row_count() == 0 {
        let empty = Paragraph::new("No posters in catalog")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = (0..app.list.row_count())
        .filter_map(|i| {
            let mut row = PosterRow::new(&app.colors);
            app.list.render_row(i, &mut row).ok()?;
            row.into_item()
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_watchlist_button(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.list.selected_count();
    let button = Paragraph::new(format!(
        "Show watchlist ({} selected) [{}]",
        count,
        key_label(&app.keybindings.watchlist)
    ))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(app.colors.accent())
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.colors.accent())),
    );

    frame.render_widget(button, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let kb = &app.keybindings;
    let mut hints = format!(
        "{}/{}: move  {}: toggle",
        key_label(&kb.down),
        key_label(&kb.up),
        key_label(&kb.toggle)
    );
    if app.watchlist_visible() {
        hints.push_str(&format!("  {}: watchlist", key_label(&kb.watchlist)));
    }
    hints.push_str(&format!(
        "  {}: help  {}: quit",
        key_label(&kb.help),
        key_label(&kb.quit)
    ));

    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

/// Draw the toast at the bottom of `area` without taking focus.
fn draw_toast(frame: &mut Frame, message: &str, area: Rect) {
    let chars = u16::try_from(message.chars().count()).unwrap_or(u16::MAX);
    let width = chars
        .saturating_add(4)
        .min(area.width.saturating_sub(2))
        .max(10.min(area.width));
    let inner_width = width.saturating_sub(2).max(1);
    let lines = chars.div_ceil(inner_width).max(1);
    let height = lines.saturating_add(2).min(area.height);

    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height.saturating_add(1)),
        width,
        height,
    };

    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(message)
        .style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(toast, toast_area);
}

fn draw_help_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let help_text = Paragraph::new(help_content(app))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(app.colors.accent())),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_text, area);
}

fn help_content(app: &App) -> String {
    let kb = &app.keybindings;
    fn row(keys: &[String], what: &str) -> String {
        format!("  {:<18}{}\n", keys.join(" / "), what)
    }

    let mut content = String::from("Posters\n───────\n");
    content.push_str(&row(&kb.up, "Move up"));
    content.push_str(&row(&kb.down, "Move down"));
    content.push_str(&row(&kb.page_up, "Page up"));
    content.push_str(&row(&kb.page_down, "Page down"));
    content.push_str(&row(&kb.top, "First poster"));
    content.push_str(&row(&kb.bottom, "Last poster"));
    content.push_str(&row(&kb.toggle, "Select / unselect poster"));
    content.push_str(&row(&kb.watchlist, "Show watchlist"));
    content.push_str("\nGeneral\n───────\n");
    content.push_str(&row(&kb.search, "Search"));
    content.push_str(&row(&kb.menu, "Menu"));
    content.push_str(&row(&kb.help, "Show/hide this help"));
    content.push_str(&row(&kb.quit, "Quit"));
    content.push_str("  Ctrl+C / Ctrl+Q   Force quit\n");
    if app.mouse {
        content.push_str("  Click             Select poster or press button\n");
    }
    content.push_str(&format!("\nPress {} to close", key_label(&kb.help)));
    content
}

/// First key name of a binding, for hints.
fn key_label(binding: &[String]) -> &str {
    binding.first().map(String::as_str).unwrap_or("-")
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::tui::Action;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::time::Instant;

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_bind_marks_selected_row() {
        let colors = ColorScheme::default();
        let catalog = Catalog::builtin();
        let poster = &catalog[0];

        let mut selected = PosterRow::new(&colors);
        selected.bind(poster, true);
        let mut plain = PosterRow::new(&colors);
        plain.bind(poster, false);

        let selected = selected.into_item().unwrap();
        let plain = plain.into_item().unwrap();
        assert_ne!(selected, plain);
        assert_eq!(selected.height(), 3);
    }

    #[test]
    fn test_bind_is_idempotent() {
        let colors = ColorScheme::default();
        let catalog = Catalog::builtin();
        let poster = &catalog[4];

        let mut first = PosterRow::new(&colors);
        first.bind(poster, true);
        let mut second = PosterRow::new(&colors);
        second.bind(poster, true);
        assert_eq!(first.into_item(), second.into_item());
    }

    #[test]
    fn test_draw_lists_posters_without_button() {
        let mut app = App::new(Catalog::builtin(), &Config::new());
        let text = render(&mut app);

        assert!(text.contains("Movie Posters"));
        assert!(text.contains("Avengers"));
        assert!(text.contains("Marvel Studios"));
        assert!(!text.contains("Show watchlist"));
        assert!(app.watchlist_area.is_none());
        assert!(app.list_area.height > 0);
    }

    #[test]
    fn test_draw_shows_checkmark_and_button_after_toggle() {
        let mut app = App::new(Catalog::builtin(), &Config::new());
        app.perform(Action::ToggleRow(1), Instant::now());
        let text = render(&mut app);

        assert!(text.contains(CHECKMARK));
        assert!(text.contains("Show watchlist (1 selected)"));
        assert!(app.watchlist_area.is_some());
    }

    #[test]
    fn test_draw_toast() {
        let mut app = App::new(Catalog::builtin(), &Config::new());
        let now = Instant::now();
        app.perform(Action::ToggleRow(4), now);
        app.perform(Action::ShowWatchlist, now);
        let text = render(&mut app);

        assert!(text.contains("Watchlist: Dune"));
    }

    #[test]
    fn test_click_on_spare_list_line_after_draw() {
        use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

        let mut app = App::new(Catalog::builtin(), &Config::new());
        let mut terminal = Terminal::new(TestBackend::new(80, 18)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert_eq!(app.list_area.height, 10);
        assert!(text.contains("Bullet Train"));
        assert!(!text.contains("Deadpool"));

        let last_line = app.list_area.y + app.list_area.height - 1;
        let action = app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: app.list_area.x + 4,
            row: last_line,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_toast_with_huge_message_in_narrow_area() {
        let message = "x".repeat(70_000);
        let mut terminal = Terminal::new(TestBackend::new(5, 20)).unwrap();
        terminal
            .draw(|f| draw_toast(f, &message, Rect::new(0, 0, 3, 20)))
            .unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains('x'));
    }

    #[test]
    fn test_hints_follow_custom_keybindings() {
        let mut config = Config::new();
        config.keybindings.toggle = vec!["x".to_string()];
        config.keybindings.watchlist = vec!["v".to_string()];
        config.keybindings.help = vec!["h".to_string()];
        config.keybindings.search = vec!["s".to_string()];
        let mut app = App::new(Catalog::builtin(), &config);
        app.perform(Action::ToggleRow(0), Instant::now());

        let text = render(&mut app);
        assert!(text.contains("x: toggle"));
        assert!(text.contains("v: watchlist"));
        assert!(text.contains("h: help"));
        assert!(text.contains("[s] Search"));
        assert!(text.contains("[v]"));
        assert!(!text.contains("space: toggle"));

        app.show_help = true;
        assert!(render(&mut app).contains("Press h to close"));
    }

    #[test]
    fn test_draw_empty_catalog() {
        let mut app = App::new(Catalog::new(Vec::new()), &Config::new());
        let text = render(&mut app);
        assert!(text.contains("No posters in catalog"));
    }

    #[test]
    fn test_draw_help_modal() {
        let mut app = App::new(Catalog::builtin(), &Config::new());
        app.show_help = true;
        let text = render(&mut app);
        assert!(text.contains("Select / unselect poster"));
    }
}
