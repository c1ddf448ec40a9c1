//! Active file and ordered open tabs

use super::file::FileId;

/// Which file is active and which files have tabs, in tab order.
///
/// Holds ids only; the [`FileStore`](super::FileStore) owns the records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active: Option<FileId>,
    open: Vec<FileId>,
}

impl Session {
    pub fn new(active: Option<FileId>, open: Vec<FileId>) -> Self {
        let mut session = Session {
            active,
            open: Vec::with_capacity(open.len()),
        };
        for id in open {
            session.open(id);
        }
        session
    }

    pub fn active(&self) -> Option<&FileId> {
        self.active.as_ref()
    }

    pub fn open_ids(&self) -> &[FileId] {
        &self.open
    }

    pub fn is_open(&self, id: &FileId) -> bool {
        self.open.contains(id)
    }

    pub fn is_active(&self, id: &FileId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub(crate) fn set_active(&mut self, id: Option<FileId>) {
        self.active = id;
    }

    /// Append a tab unless it is already open; existing tabs keep their position
    pub(crate) fn open(&mut self, id: FileId) {
        if !self.open.contains(&id) {
            self.open.push(id);
        }
    }

    /// Remove a tab. Returns the index it occupied.
    pub(crate) fn close(&mut self, id: &FileId) -> Option<usize> {
        let index = self.open.iter().position(|open| open == id)?;
        self.open.remove(index);
        Some(index)
    }

    pub(crate) fn retain_open(&mut self, mut keep: impl FnMut(&FileId) -> bool) {
        self.open.retain(|id| keep(id));
    }

    /// Tab index of the active file, if it has a tab
    pub fn active_index(&self) -> Option<usize> {
        let active = self.active.as_ref()?;
        self.open.iter().position(|id| id == active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<FileId> {
        raw.iter().map(|s| FileId::from(*s)).collect()
    }

    #[test]
    fn test_new_dedups_open_ids() {
        let session = Session::new(None, ids(&["1", "2", "1", "3", "2"]));
        assert_eq!(session.open_ids(), ids(&["1", "2", "3"]).as_slice());
    }

    #[test]
    fn test_reopen_keeps_position() {
        let mut session = Session::new(None, ids(&["1", "2", "3"]));
        session.open(FileId::from("1"));
        session.open(FileId::from("4"));
        assert_eq!(session.open_ids(), ids(&["1", "2", "3", "4"]).as_slice());
    }

    #[test]
    fn test_close_reports_index() {
        let mut session = Session::new(None, ids(&["1", "2", "3"]));
        assert_eq!(session.close(&FileId::from("2")), Some(1));
        assert_eq!(session.close(&FileId::from("2")), None);
    }
}
