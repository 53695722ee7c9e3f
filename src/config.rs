//! Configuration file support for poster-watchlist.
//!
//! This module provides functionality for loading and saving user preferences
//! from a TOML configuration file.

use crate::error::{AppError, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// User configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog file to load instead of the built-in posters
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Whether mouse clicks toggle rows
    #[serde(default = "default_mouse")]
    pub mouse: bool,

    /// Row and accent colors
    #[serde(default)]
    pub colors: ColorScheme,

    /// Key names bound to each action
    #[serde(default)]
    pub keybindings: Keybindings,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_mouse() -> bool {
    true
}

/// Colors used by the poster list.
///
/// Values are color names or hex codes understood by ratatui
/// (`"darkgray"`, `"#1e3a5f"`, `"12"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// Background tint of a selected row
    pub selected_bg: String,
    /// Background of an unselected row
    pub default_bg: String,
    /// Checkmark glyph color
    pub checkmark: String,
    /// Title, borders and the watchlist button
    pub accent: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            selected_bg: "blue".to_string(),
            default_bg: "reset".to_string(),
            checkmark: "lightgreen".to_string(),
            accent: "magenta".to_string(),
        }
    }
}

impl ColorScheme {
    /// Parse a configured color, falling back to `Color::Reset`.
    pub fn resolve(value: &str) -> Color {
        Color::from_str(value).unwrap_or(Color::Reset)
    }

    pub fn selected_bg(&self) -> Color {
        Self::resolve(&self.selected_bg)
    }

    pub fn default_bg(&self) -> Color {
        Self::resolve(&self.default_bg)
    }

    pub fn checkmark(&self) -> Color {
        Self::resolve(&self.checkmark)
    }

    pub fn accent(&self) -> Color {
        Self::resolve(&self.accent)
    }
}

/// Key names bound to each action.
///
/// A key name is a single character (`"j"`, `" "`) or one of `enter`,
/// `space`, `esc`, `tab`, `backspace`, `up`, `down`, `left`, `right`,
/// `pageup`, `pagedown`, `home`, `end`, `f1`..`f12`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub page_up: Vec<String>,
    pub page_down: Vec<String>,
    pub top: Vec<String>,
    pub bottom: Vec<String>,
    pub toggle: Vec<String>,
    pub watchlist: Vec<String>,
    pub search: Vec<String>,
    pub menu: Vec<String>,
    pub help: Vec<String>,
    pub quit: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: keys(&["up", "k"]),
            down: keys(&["down", "j"]),
            page_up: keys(&["pageup"]),
            page_down: keys(&["pagedown"]),
            top: keys(&["home", "g"]),
            bottom: keys(&["end", "G"]),
            toggle: keys(&["space", "enter"]),
            watchlist: keys(&["w"]),
            search: keys(&["/"]),
            menu: keys(&["m"]),
            help: keys(&["?"]),
            quit: keys(&["q", "esc"]),
        }
    }
}

impl Keybindings {
    /// Whether `key` matches any of the key names in `binding`.
    pub fn matches(&self, binding: &[String], key: &KeyEvent) -> bool {
        binding
            .iter()
            .filter_map(|name| parse_key(name))
            .any(|code| code == key.code)
    }
}

/// Translate a key name into a crossterm key code.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        other => {
            let n: u8 = other.strip_prefix('f')?.parse().ok()?;
            if (1..=12).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
    };
    Some(code)
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self {
            catalog: None,
            mouse: default_mouse(),
            colors: ColorScheme::default(),
            keybindings: Keybindings::default(),
        }
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/poster-watchlist/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("poster-watchlist");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load config from `path`, or defaults if the file doesn't exist.
    ///
    /// A relative `catalog` path is taken relative to the config file's
    /// directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate()?;

        let dir = path.parent().unwrap_or(Path::new(""));
        config.catalog = config.catalog.map(|catalog| {
            if catalog.is_relative() {
                dir.join(catalog)
            } else {
                catalog
            }
        });
        Ok(config)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Write a default config file at `path` if none exists.
    ///
    /// Returns whether a file was written.
    pub fn create_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::new().save_to(path)?;
        Ok(true)
    }

    /// Reject key names that can never match.
    fn validate(&self) -> Result<()> {
        let kb = &self.keybindings;
        let all = [
            &kb.up,
            &kb.down,
            &kb.page_up,
            &kb.page_down,
            &kb.top,
            &kb.bottom,
            &kb.toggle,
            &kb.watchlist,
            &kb.search,
            &kb.menu,
            &kb.help,
            &kb.quit,
        ];
        for name in all.into_iter().flatten() {
            if parse_key(name).is_none() {
                return Err(AppError::Config(format!("unknown key name '{}'", name)));
            }
        }
        Ok(())
    }
}
