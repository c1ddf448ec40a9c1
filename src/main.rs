// YSCode: multi-file terminal code editor

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use yscode::config::Config;
use yscode::editor::EditorEngine;
use yscode::highlight::SyntectHighlighter;
use yscode::logging;
use yscode::runner::QuickJsHost;
use yscode::storage::{JsonFileStore, KeyValueStore, MemoryStore, Persistence};
use yscode::ui::App;

#[derive(Parser, Debug)]
#[command(name = "yscode", version, about = "Multi-file code editor for the terminal")]
struct Args {
    /// Directory holding storage.json and the log file
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/yscode/config.json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file (default: <state dir>/yscode.log)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// syntect theme used for highlighting
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,
}

impl Args {
    /// Load the config file and apply command-line overrides
    fn resolve_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = match self.config.clone().or_else(Config::default_path) {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        };
        if let Some(dir) = &self.state_dir {
            config.state_dir = Some(dir.clone());
        }
        if let Some(file) = &self.log_file {
            config.log_file = Some(file.clone());
        }
        if let Some(theme) = &self.theme {
            config.syntax_theme = theme.clone();
        }
        config.ephemeral |= self.ephemeral;
        Ok(config.sanitized())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.resolve_config()?;

    let log_path = config.log_path();
    if let Err(e) = logging::init_global(&log_path) {
        eprintln!("Warning: cannot open log file {}: {}", log_path.display(), e);
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting yscode");

    let backend: Box<dyn KeyValueStore> = if config.ephemeral {
        tracing::info!("ephemeral session, nothing is written to disk");
        Box::new(MemoryStore::new())
    } else {
        let path = config.storage_path();
        tracing::info!(path = %path.display(), "opening storage");
        Box::new(JsonFileStore::open(path))
    };
    let persistence = Persistence::new(backend);
    let workspace = persistence.load();

    let editor = EditorEngine::new(Box::new(SyntectHighlighter::new(&config.syntax_theme)));
    let script_host = QuickJsHost::with_time_limit(config.script_time_limit())?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(workspace, editor, persistence, Box::new(script_host), &config);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }
    tracing::info!("exiting");

    Ok(())
}
