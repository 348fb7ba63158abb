// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Terminal playground for the hotkeys behavior

mod app;
mod logging;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hotkeys::config;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "hotkeys")]
#[command(author = "Hotkeys Contributors")]
#[command(version)]
#[command(about = "Try out hotkey bindings on a view in the terminal")]
struct CliArgs {
    /// Config file (default: ~/.config/hotkeys/config.toml, created if missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen on the whole document regardless of the config file
    #[arg(short, long)]
    document: bool,
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let poll_timeout = Duration::from_millis(500);

    terminal.draw(|f| ui::draw(f, app))?;
    app.attach();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(poll_timeout)? {
            continue;
        }
        let Ok(Event::Key(key)) = event::read() else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        app.handle_key(key);
    }

    app.shutdown();
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => config::config_file_path()?,
    };
    let log_dir = match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create directory: {}", log_dir.display()))?;
    let _log_guard = logging::init(&log_dir)?;
    let mut cfg = config::load_config(&config_path)?;
    if args.document {
        cfg.attach_to_document = true;
    }

    let mut app = App::new(cfg, config_path)?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    enable_raw_mode()?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
