//! File store and session state
//!
//! [`Workspace`] is the single owner of everything the editor edits: the
//! [`FileStore`] holding the records and the [`Session`] that says which file
//! is active and which files have tabs. The tab-controller operations
//! (`switch_to`, `close_tab`, `delete_file`) live here because each one has to
//! reconcile both halves.
//!
//! Ids in the session may dangle for a moment (a persisted open id whose file
//! is gone, for example). Readers skip them; [`Workspace::normalize`] drops them.

mod file;
mod session;
mod store;

pub use file::{default_files, FileIcon, FileId, FileRecord, Language};
pub use session::Session;
pub use store::FileStore;

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    store: FileStore,
    session: Session,
}

impl Workspace {
    pub fn new(store: FileStore, session: Session) -> Self {
        Workspace { store, session }
    }

    /// The seed workspace: three starter files, the first active, all open
    pub fn with_defaults() -> Self {
        let store = FileStore::from_records(default_files());
        let open: Vec<FileId> = store.iter().map(|f| f.id.clone()).collect();
        let active = open.first().cloned();
        Workspace::new(store, Session::new(active, open))
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn active_id(&self) -> Option<&FileId> {
        self.session.active()
    }

    /// The active record, if the active id resolves
    pub fn active_file(&self) -> Option<&FileRecord> {
        self.session.active().and_then(|id| self.store.get(id))
    }

    /// Open tabs in order, skipping ids that no longer resolve
    pub fn open_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.session
            .open_ids()
            .iter()
            .filter_map(|id| self.store.get(id))
    }

    pub fn active_content(&self) -> Option<&str> {
        self.active_file().map(|f| f.content.as_str())
    }

    /// Write text into the active record. No-op when nothing (valid) is active.
    pub fn set_active_content(&mut self, text: &str) {
        if let Some(id) = self.session.active().cloned() {
            self.store.set_content(&id, text);
        }
    }

    /// Commit the live editor text into the record that owns it
    pub fn commit(&mut self, live_text: &str) {
        self.set_active_content(live_text);
    }

    /// Create an empty file. It is not opened or activated.
    pub fn create_file(&mut self, name: &str) -> FileId {
        self.store.create_file(name).id.clone()
    }

    /// Make `id` the active file, giving it a tab if it has none.
    ///
    /// `live_text` is the editor's current text; it is committed into the
    /// currently active record before anything changes. Returns `false` (and
    /// changes nothing) when `id` does not resolve.
    pub fn switch_to(&mut self, id: &FileId, live_text: Option<&str>) -> bool {
        if !self.store.contains(id) {
            tracing::debug!(%id, "switch to unknown file ignored");
            return false;
        }
        if let Some(text) = live_text {
            self.commit(text);
        }
        self.session.set_active(Some(id.clone()));
        self.session.open(id.clone());
        tracing::debug!(%id, "switched file");
        true
    }

    /// Remove a tab without touching the file.
    ///
    /// Closing the active tab activates its left neighbour, else the new first
    /// tab, else nothing.
    pub fn close_tab(&mut self, id: &FileId) {
        let Some(index) = self.session.close(id) else {
            return;
        };
        if self.session.is_active(id) {
            let fallback = self.tab_fallback(index);
            self.session.set_active(fallback);
        }
    }

    fn tab_fallback(&self, closed_index: usize) -> Option<FileId> {
        let open = self.session.open_ids();
        let (left, right) = open.split_at(closed_index.min(open.len()));
        left.iter()
            .rev()
            .chain(right.iter())
            .find(|id| self.store.contains(id))
            .cloned()
    }

    /// Delete a file and reconcile the session.
    ///
    /// When the active file is deleted, the first remaining file becomes
    /// active (and gets a tab); with no files left nothing is active.
    pub fn delete_file(&mut self, id: &FileId) -> Option<FileRecord> {
        let removed = self.store.delete_file(id)?;
        self.session.retain_open(|open| open != id);
        if self.session.is_active(id) {
            let fallback = self.store.first().map(|f| f.id.clone());
            if let Some(next) = &fallback {
                self.session.open(next.clone());
            }
            self.session.set_active(fallback);
        }
        tracing::info!(%id, name = %removed.name, "deleted file");
        Some(removed)
    }

    /// Drop dangling open ids, repair a dangling active id and give the
    /// active file a tab
    pub fn normalize(&mut self) {
        let store = &self.store;
        self.session.retain_open(|id| store.contains(id));
        let active_ok = self
            .session
            .active()
            .is_some_and(|id| self.store.contains(id));
        if !active_ok {
            let fallback = self.store.first().map(|f| f.id.clone());
            self.session.set_active(fallback);
        }
        if let Some(active) = self.session.active().cloned() {
            self.session.open(active);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> FileId {
        FileId::from(raw)
    }

    #[test]
    fn test_defaults() {
        let ws = Workspace::with_defaults();
        assert_eq!(ws.active_id(), Some(&id("1")));
        let open: Vec<&str> = ws.session().open_ids().iter().map(|i| i.as_str()).collect();
        assert_eq!(open, ["1", "2", "3"]);
    }

    #[test]
    fn test_switch_commits_live_text_first() {
        let mut ws = Workspace::with_defaults();
        assert!(ws.switch_to(&id("2"), Some("edited html")));
        assert_eq!(ws.store().content_of(&id("1")), Some("edited html"));
        assert_eq!(ws.active_id(), Some(&id("2")));
    }

    #[test]
    fn test_switch_to_missing_is_noop() {
        let mut ws = Workspace::with_defaults();
        let before = ws.session().clone();
        assert!(!ws.switch_to(&id("42"), Some("lost?")));
        assert_eq!(ws.session(), &before);
        assert_ne!(ws.store().content_of(&id("1")), Some("lost?"));
    }

    #[test]
    fn test_created_file_is_not_opened() {
        let mut ws = Workspace::with_defaults();
        let new_id = ws.create_file("app.py");
        assert!(!ws.session().is_open(&new_id));
        assert_eq!(ws.active_id(), Some(&id("1")));

        ws.switch_to(&new_id, None);
        assert_eq!(ws.session().open_ids().last(), Some(&new_id));
    }

    #[test]
    fn test_close_active_tab_falls_back_left() {
        let mut ws = Workspace::with_defaults();
        ws.switch_to(&id("3"), None);
        ws.close_tab(&id("3"));
        assert_eq!(ws.active_id(), Some(&id("2")));
        assert!(ws.store().contains(&id("3")));
    }

    #[test]
    fn test_close_first_active_tab_falls_back_to_new_first() {
        let mut ws = Workspace::with_defaults();
        ws.close_tab(&id("1"));
        assert_eq!(ws.active_id(), Some(&id("2")));
    }

    #[test]
    fn test_close_last_tab_leaves_nothing_active() {
        let mut ws = Workspace::with_defaults();
        for raw in ["1", "2", "3"] {
            ws.close_tab(&id(raw));
        }
        assert_eq!(ws.active_id(), None);
        assert_eq!(ws.store().len(), 3);
    }

    #[test]
    fn test_close_inactive_tab_keeps_active() {
        let mut ws = Workspace::with_defaults();
        ws.close_tab(&id("2"));
        assert_eq!(ws.active_id(), Some(&id("1")));
    }

    #[test]
    fn test_delete_active_picks_first_remaining() {
        let mut ws = Workspace::with_defaults();
        ws.switch_to(&id("2"), None);
        ws.delete_file(&id("2"));
        assert_eq!(ws.active_id(), Some(&id("1")));
        assert!(!ws.session().is_open(&id("2")));
    }

    #[test]
    fn test_delete_everything_empties_active() {
        let mut ws = Workspace::with_defaults();
        for raw in ["1", "2", "3"] {
            ws.delete_file(&id(raw));
        }
        assert_eq!(ws.active_id(), None);
        assert!(ws.session().open_ids().is_empty());
        ws.set_active_content("ignored");
        assert!(ws.active_content().is_none());
    }

    #[test]
    fn test_normalize_repairs_dangling_ids() {
        let store = FileStore::from_records(default_files());
        let session = Session::new(Some(id("9")), vec![id("9"), id("2")]);
        let mut ws = Workspace::new(store, session);
        assert_eq!(ws.open_files().count(), 1);
        ws.normalize();
        assert_eq!(ws.session().open_ids(), &[id("2"), id("1")]);
        assert_eq!(ws.active_id(), Some(&id("1")));
    }
}
