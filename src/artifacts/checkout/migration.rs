//! Working-directory migration planning
//!
//! Checkout, reset and merge all end by making the working directory match a
//! target snapshot. Planning is pure: every blob the target needs is loaded
//! up front and compared against the working file, so a missing blob or an
//! unreadable file fails the operation before anything on disk changes.
//!
//! ## Actions
//!
//! - `Add`: the target file does not exist in the working directory
//! - `Modify`: the working file exists with different content
//! - `Delete`: a policy-matching working file is absent from the target
//!
//! Working files that already hold the target content are left alone.
//!
//! A target file whose path is currently a directory is only planned when
//! every file below that directory is itself deleted by the migration.
//! Anything else there (untracked files, files outside the extension policy)
//! makes the plan fail.

use crate::areas::blob_store::BlobStore;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::FileSet;
use crate::errors::{VcError, VcResult};
use bytes::Bytes;
use std::collections::{BTreeSet, HashMap};

/// Type of file system action required to reach the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Modify existing file
    Modify,
}

/// Set of planned actions grouped by type, with the content to write
pub type ActionsSet = HashMap<ActionType, Vec<(String, Option<Bytes>)>>;

#[derive(Debug, Default)]
pub struct Migration {
    actions: ActionsSet,
    unchanged: usize,
    /// Directories emptied so that a target file can take their place
    replaced_dirs: Vec<String>,
}

impl Migration {
    /// Plan the changes that turn the working directory into `target`
    pub fn plan(workspace: &Workspace, blobs: &BlobStore, target: &FileSet) -> VcResult<Self> {
        let mut migration = Migration {
            actions: HashMap::from([
                (ActionType::Add, Vec::new()),
                (ActionType::Delete, Vec::new()),
                (ActionType::Modify, Vec::new()),
            ]),
            unchanged: 0,
            replaced_dirs: Vec::new(),
        };

        let obsolete = workspace
            .list_files()?
            .into_iter()
            .filter(|file_name| !target.contains_key(file_name))
            .collect::<BTreeSet<_>>();

        for (file_name, oid) in target {
            let content = blobs.get(oid, file_name)?;

            let action = if workspace.dir_exists(file_name) {
                let kept = workspace
                    .list_all_files_in(file_name)?
                    .into_iter()
                    .filter(|inner| !obsolete.contains(inner))
                    .collect::<Vec<_>>();
                if !kept.is_empty() {
                    return Err(VcError::io(
                        format!(
                            "cannot replace directory {file_name} with a file; it holds files that would be lost: {}",
                            kept.join(", ")
                        ),
                        std::io::Error::from(std::io::ErrorKind::AlreadyExists),
                    ));
                }

                migration.replaced_dirs.push(file_name.clone());
                ActionType::Add
            } else if !workspace.file_exists(file_name) {
                ActionType::Add
            } else if workspace.read_file(file_name)? != content {
                ActionType::Modify
            } else {
                migration.unchanged += 1;
                continue;
            };

            migration.record(action, file_name.clone(), Some(content));
        }

        for file_name in obsolete {
            migration.record(ActionType::Delete, file_name, None);
        }

        tracing::debug!(
            added = migration.count(ActionType::Add),
            modified = migration.count(ActionType::Modify),
            deleted = migration.count(ActionType::Delete),
            unchanged = migration.unchanged,
            "planned working directory migration"
        );

        Ok(migration)
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    pub fn actions_of(&self, action: ActionType) -> impl Iterator<Item = (&String, &Option<Bytes>)> {
        self.actions
            .get(&action)
            .into_iter()
            .flatten()
            .map(|(file_name, content)| (file_name, content))
    }

    pub fn count(&self, action: ActionType) -> usize {
        self.actions.get(&action).map_or(0, Vec::len)
    }

    pub fn unchanged(&self) -> usize {
        self.unchanged
    }

    /// Check whether a working file sits below a directory that a target
    /// file replaces
    pub fn is_in_replaced_dir(&self, file_name: &str) -> bool {
        self.replaced_dirs.iter().any(|dir| {
            file_name
                .strip_prefix(dir.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    fn record(&mut self, action: ActionType, file_name: String, content: Option<Bytes>) {
        self.actions
            .entry(action)
            .or_default()
            .push((file_name, content));
    }
}
