//! Editor configuration
//!
//! Settings come from an optional JSON file (by default
//! `<config dir>/yscode/config.json`); command-line flags override them.
//! Missing fields take their defaults.

use crate::highlight::DEFAULT_SYNTAX_THEME;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "yscode";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// syntect theme name
    pub syntax_theme: String,

    /// Where `storage.json` and the log live; defaults to the user data dir
    pub state_dir: Option<PathBuf>,

    /// Overrides `<state_dir>/yscode.log`
    pub log_file: Option<PathBuf>,

    /// Explorer width in columns
    pub explorer_width: u16,

    /// Terminal panel height as a percentage of the editor column
    pub terminal_height: u16,

    /// Keep everything in memory; nothing is read from or written to disk
    pub ephemeral: bool,

    /// Seconds a script may run before it is interrupted
    pub script_time_limit_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            syntax_theme: DEFAULT_SYNTAX_THEME.to_string(),
            state_dir: None,
            log_file: None,
            explorer_width: 26,
            terminal_height: 30,
            ephemeral: false,
            script_time_limit_secs: 5,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl Config {
    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/yscode/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(".yscode"))
        })
    }

    /// The key-value store file
    pub fn storage_path(&self) -> PathBuf {
        self.state_dir().join("storage.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.state_dir().join("yscode.log"))
    }

    pub fn script_time_limit(&self) -> Duration {
        Duration::from_secs(self.script_time_limit_secs)
    }

    /// Clamp layout values and the script time limit into usable ranges
    pub fn sanitized(mut self) -> Self {
        self.explorer_width = self.explorer_width.clamp(12, 60);
        self.terminal_height = self.terminal_height.clamp(10, 80);
        self.script_time_limit_secs = self.script_time_limit_secs.clamp(1, 600);
        self
    }
}
