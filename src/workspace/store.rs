//! The set of live file records

use super::file::{FileId, FileRecord};
use chrono::Utc;

/// Owns every file record, in explorer display order
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    files: Vec<FileRecord>,
}

impl FileStore {
    pub fn new() -> Self {
        FileStore { files: Vec::new() }
    }

    /// Build a store from already-identified records (seed data or a loaded snapshot).
    ///
    /// Later records with an id already seen are dropped so ids stay unique.
    pub fn from_records(records: Vec<FileRecord>) -> Self {
        let mut store = FileStore::new();
        for record in records {
            if store.get(&record.id).is_some() {
                tracing::warn!(id = %record.id, "dropping file record with duplicate id");
                continue;
            }
            store.files.push(record);
        }
        store
    }

    /// Create an empty file and append it to the store.
    ///
    /// The language is inferred from the name. The file is neither opened nor
    /// activated; the caller decides that.
    pub fn create_file(&mut self, name: &str) -> &FileRecord {
        let id = self.next_id(Utc::now().timestamp_millis().max(0) as u64);
        tracing::debug!(%id, name, "creating file");
        self.files.push(FileRecord::new(id, name));
        &self.files[self.files.len() - 1]
    }

    /// Timestamp-derived id, bumped past any numeric id already in use.
    /// Wraps around when a stored id already sits at `u64::MAX`.
    fn next_id(&self, now_millis: u64) -> FileId {
        let floor = self
            .files
            .iter()
            .filter_map(|f| f.id.numeric())
            .max()
            .map_or(0, |max| max.saturating_add(1));
        let mut candidate = now_millis.max(floor);
        loop {
            let id = FileId::new(candidate.to_string());
            if !self.contains(&id) {
                return id;
            }
            candidate = candidate.wrapping_add(1);
        }
    }

    /// Remove a record. Returns the removed record, or `None` if the id is unknown.
    pub fn delete_file(&mut self, id: &FileId) -> Option<FileRecord> {
        let index = self.files.iter().position(|f| &f.id == id)?;
        Some(self.files.remove(index))
    }

    pub fn get(&self, id: &FileId) -> Option<&FileRecord> {
        self.files.iter().find(|f| &f.id == id)
    }

    pub fn get_mut(&mut self, id: &FileId) -> Option<&mut FileRecord> {
        self.files.iter_mut().find(|f| &f.id == id)
    }

    pub fn content_of(&self, id: &FileId) -> Option<&str> {
        self.get(id).map(|f| f.content.as_str())
    }

    /// Replace a record's content. Returns `false` if the id is unknown.
    pub fn set_content(&mut self, id: &FileId, text: &str) -> bool {
        match self.get_mut(id) {
            Some(file) => {
                if file.content != text {
                    file.content.clear();
                    file.content.push_str(text);
                }
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.get(id).is_some()
    }

    pub fn first(&self) -> Option<&FileRecord> {
        self.files.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter()
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::file::{default_files, Language};

    #[test]
    fn test_create_file_infers_language_and_is_empty() {
        let mut store = FileStore::new();
        let file = store.create_file("notes.md");
        assert_eq!(file.language, Language::Markdown);
        assert!(file.content.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut store = FileStore::from_records(default_files());
        assert_eq!(store.next_id(2).as_str(), "4");
        assert_eq!(store.next_id(100).as_str(), "100");

        let id1 = store.create_file("a.js").id.clone();
        let id2 = store.create_file("b.js").id.clone();
        assert_ne!(id1, id2);
        assert!(id2.numeric() > id1.numeric());
    }

    #[test]
    fn test_id_at_numeric_limit_does_not_overflow() {
        let max = FileRecord::new(FileId::new(u64::MAX.to_string()), "a.js");
        let mut store = FileStore::from_records(vec![max]);

        let id = store.create_file("b.js").id.clone();
        assert_ne!(id.as_str(), u64::MAX.to_string());
        assert_eq!(store.len(), 2);
        assert!(store.contains(&id));
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = FileStore::from_records(default_files());
        assert!(store.delete_file(&FileId::from("nope")).is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_duplicate_ids_dropped_on_build() {
        let mut files = default_files();
        files.push(files[0].clone());
        let store = FileStore::from_records(files);
        assert_eq!(store.len(), 3);
    }
}
