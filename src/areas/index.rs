//! Staging area
//!
//! The staging area holds the pending delta against HEAD: files scheduled to
//! be recorded (filename -> blob id) and files scheduled for removal. A commit
//! overlays the delta on HEAD's snapshot and then clears it.

use crate::artifacts::objects::commit::FileSet;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingArea {
    staged: FileSet,
    removed: BTreeSet<String>,
}

impl StagingArea {
    pub fn staged(&self) -> &FileSet {
        &self.staged
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty() && self.removed.is_empty()
    }

    pub fn is_staged(&self, file_name: &str) -> bool {
        self.staged.contains_key(file_name)
    }

    /// Schedule a file to be recorded with the given content
    ///
    /// Staging a file cancels a pending removal of the same name.
    pub fn stage(&mut self, file_name: String, oid: ObjectId) {
        self.removed.remove(&file_name);
        self.staged.insert(file_name, oid);
    }

    /// Drop a pending staging entry without scheduling a removal
    pub fn unstage(&mut self, file_name: &str) -> Option<ObjectId> {
        self.staged.remove(file_name)
    }

    /// Schedule a file for removal, dropping any pending staging entry
    pub fn remove(&mut self, file_name: &str) {
        self.staged.remove(file_name);
        self.removed.insert(file_name.to_string());
    }

    pub fn clear(&mut self) {
        self.staged.clear();
        self.removed.clear();
    }

    /// Apply the pending delta to a base snapshot
    pub fn snapshot(&self, base: &FileSet) -> FileSet {
        let mut files = base.clone();

        files.extend(
            self.staged
                .iter()
                .map(|(name, oid)| (name.clone(), oid.clone())),
        );
        for name in &self.removed {
            files.remove(name);
        }

        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn files(entries: &[(&str, &[u8])]) -> FileSet {
        entries
            .iter()
            .map(|(name, content)| (name.to_string(), ObjectId::digest(content)))
            .collect()
    }

    #[test]
    fn snapshot_overlays_staged_and_drops_removed() {
        let base = files(&[("a.txt", b"A"), ("b.txt", b"B"), ("c.txt", b"C")]);
        let mut staging = StagingArea::default();

        staging.stage("a.txt".to_string(), ObjectId::digest(b"A2"));
        staging.stage("d.txt".to_string(), ObjectId::digest(b"D"));
        staging.remove("b.txt");

        assert_eq!(
            staging.snapshot(&base),
            files(&[("a.txt", b"A2"), ("c.txt", b"C"), ("d.txt", b"D")])
        );
    }

    #[test]
    fn staging_cancels_a_pending_removal() {
        let mut staging = StagingArea::default();

        staging.remove("a.txt");
        staging.stage("a.txt".to_string(), ObjectId::digest(b"A"));

        assert!(staging.removed().is_empty());
        assert!(staging.is_staged("a.txt"));
    }

    #[test]
    fn removal_drops_the_staged_entry() {
        let mut staging = StagingArea::default();

        staging.stage("a.txt".to_string(), ObjectId::digest(b"A"));
        staging.remove("a.txt");

        assert!(!staging.is_staged("a.txt"));
        assert!(staging.removed().contains("a.txt"));
        assert!(!staging.is_empty());

        staging.clear();
        assert!(staging.is_empty());
    }
}
