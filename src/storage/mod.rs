//! Persistence of the workspace to a key-value store
//!
//! Three independent string entries are used:
//!
//! | key             | value                                   |
//! |-----------------|-----------------------------------------|
//! | `ysc_files`     | JSON array of file records              |
//! | `ysc_active_id` | the active id as a bare string          |
//! | `ysc_open_ids`  | JSON array of open ids, in tab order    |
//!
//! Every entry may be missing or corrupt. A bad file list means the whole
//! workspace falls back to the seed files; a bad session entry falls back to
//! the seed session and is then repaired against the files that did load.

mod backend;

pub use backend::{JsonFileStore, KeyValueStore, MemoryStore};

use crate::workspace::{FileId, FileRecord, FileStore, Session, Workspace};
use std::fmt;
use std::io;

pub const FILES_KEY: &str = "ysc_files";
pub const ACTIVE_ID_KEY: &str = "ysc_active_id";
pub const OPEN_IDS_KEY: &str = "ysc_open_ids";

/// Errors from writing to a backend
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {}", e),
            StorageError::Serialize(e) => write!(f, "cannot serialize workspace: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialize(e)
    }
}

/// Saves and restores a [`Workspace`] through a [`KeyValueStore`]
pub struct Persistence {
    backend: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Persistence { backend }
    }

    /// Write files, active id and open ids
    pub fn save(&mut self, workspace: &Workspace) -> Result<(), StorageError> {
        let files = serde_json::to_string(workspace.store().records())?;
        let active = workspace
            .active_id()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default();
        let open = serde_json::to_string(workspace.session().open_ids())?;

        self.backend.set(FILES_KEY, files)?;
        self.backend.set(ACTIVE_ID_KEY, active)?;
        self.backend.set(OPEN_IDS_KEY, open)?;
        tracing::debug!(files = workspace.store().len(), "workspace saved");
        Ok(())
    }

    /// Restore the workspace, falling back to the seed data where entries are
    /// missing or malformed
    pub fn load(&self) -> Workspace {
        let Some(files) = self.read_files() else {
            tracing::info!("no saved files, starting from defaults");
            return Workspace::with_defaults();
        };

        let defaults = Workspace::with_defaults();
        let active = match self.backend.get(ACTIVE_ID_KEY) {
            Some(raw) if raw.is_empty() => None,
            Some(raw) => Some(FileId::new(raw)),
            None => defaults.active_id().cloned(),
        };
        let open = self
            .backend
            .get(OPEN_IDS_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<FileId>>(&raw) {
                Ok(ids) => Some(ids),
                Err(e) => {
                    tracing::warn!("ignoring malformed open ids: {}", e);
                    None
                }
            })
            .unwrap_or_else(|| defaults.session().open_ids().to_vec());

        let mut workspace = Workspace::new(
            FileStore::from_records(files),
            Session::new(active, open),
        );
        workspace.normalize();
        tracing::info!(files = workspace.store().len(), "workspace restored");
        workspace
    }

    fn read_files(&self) -> Option<Vec<FileRecord>> {
        let raw = self.backend.get(FILES_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(files) => Some(files),
            Err(e) => {
                tracing::warn!("ignoring malformed saved files: {}", e);
                None
            }
        }
    }
}
