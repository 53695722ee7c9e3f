//! Main entry point for the poster-watchlist application.

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use poster_watchlist::catalog::Catalog;
use poster_watchlist::config::Config;
use poster_watchlist::tui::{draw, poll_event, App};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Command-line arguments for the poster-watchlist application.
#[derive(Parser, Debug)]
#[command(
    name = "poster-watchlist",
    version,
    about = "Browse movie posters and build a watchlist",
    long_about = "Browse a catalog of movie posters in a TUI and pick titles for a watchlist."
)]
struct Args {
    /// Catalog file to use instead of the built-in posters
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the catalog as TOML and exit
    #[arg(short, long)]
    print_catalog: bool,

    /// Write a default config file if none exists, then exit
    #[arg(long)]
    init_config: bool,
}

/// Initialize the terminal for TUI rendering.
fn init_terminal(mouse: bool) -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    if mouse {
        execute!(stdout(), EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal(mouse: bool) -> io::Result<()> {
    if mouse {
        execute!(stdout(), DisableMouseCapture)?;
    }
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut logger = env_logger::Builder::new();
    logger
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false);
    if let Some(path) = &args.log_file {
        logger.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    logger.init();

    debug!("Log level set to {:?}", log_level);

    if args.init_config {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => Config::get_config_path()?,
        };
        if Config::create_default_if_missing(&path)? {
            println!("Wrote default config to {}", path.display());
        } else {
            println!("Config already exists at {}", path.display());
        }
        return Ok(());
    }

    // Load config
    let config_result = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = config_result.unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // CLI catalog overrides the config one
    let catalog = match args.catalog.as_ref().or(config.catalog.as_ref()) {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Error: Could not load catalog '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Catalog::builtin(),
    };

    info!("Catalog has {} posters", catalog.len());

    if args.print_catalog {
        print!("{}", catalog.to_toml_string()?);
        return Ok(());
    }

    let mut terminal = init_terminal(config.mouse)?;
    let mut app = App::new(catalog, &config);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(config.mouse)?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        if app.take_redraw() {
            terminal.draw(|f| draw(f, app))?;
        }

        let action = match poll_event(Duration::from_millis(100))? {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => app.handle_input(key),
            Some(Event::Mouse(mouse)) => app.handle_mouse(mouse),
            Some(Event::Resize(_, _)) => {
                app.mark_dirty();
                continue;
            }
            _ => continue,
        };

        app.perform(action, Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
