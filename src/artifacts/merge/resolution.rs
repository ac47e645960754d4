//! Three-way resolution of two snapshots against their merge base
//!
//! For every file in either head:
//!
//! | ours | theirs | base         | outcome          |
//! |------|--------|--------------|------------------|
//! | x    | -      |              | x                |
//! | -    | y      |              | y                |
//! | x    | x      |              | x                |
//! | x    | y      | y            | x (we changed)   |
//! | x    | y      | x            | y (they changed) |
//! | x    | y      | other / none | conflict         |

use crate::artifacts::objects::commit::FileSet;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;

/// Marker written between our content and the branch marker of a conflict
pub const CONFLICT_OURS_MARKER: &str = "<<<<<<<<<<<<<<<HEAD";
/// Prefix of the marker naming the merged branch
pub const CONFLICT_THEIRS_MARKER: &str = ">>>>>>>>>>>>>>>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub file_name: String,
    pub ours: ObjectId,
    pub theirs: ObjectId,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Cleanly resolved entries, conflicting files excluded
    pub resolved: FileSet,
    pub conflicts: Vec<Conflict>,
}

impl Resolution {
    pub fn resolve(base: &FileSet, ours: &FileSet, theirs: &FileSet) -> Self {
        let names = ours.keys().chain(theirs.keys()).collect::<BTreeSet<_>>();
        let mut resolution = Resolution::default();

        for name in names {
            let picked = match (ours.get(name), theirs.get(name)) {
                (Some(ours), None) => ours,
                (None, Some(theirs)) => theirs,
                (Some(ours), Some(theirs)) if ours == theirs => ours,
                (Some(ours), Some(theirs)) => match base.get(name) {
                    Some(base) if base == theirs => ours,
                    Some(base) if base == ours => theirs,
                    _ => {
                        tracing::debug!(file_name = %name, "both sides changed the file");
                        resolution.conflicts.push(Conflict {
                            file_name: name.clone(),
                            ours: ours.clone(),
                            theirs: theirs.clone(),
                        });
                        continue;
                    }
                },
                (None, None) => continue,
            };

            resolution.resolved.insert(name.clone(), picked.clone());
        }

        resolution
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Build the working content of a conflicting file
///
/// Our bytes, the HEAD marker line, the branch marker line, then their bytes.
/// No newline is inserted after `ours`.
pub fn conflict_content(ours: &[u8], theirs: &[u8], branch: &str) -> Vec<u8> {
    let mut content = Vec::with_capacity(
        ours.len() + theirs.len() + branch.len() + CONFLICT_OURS_MARKER.len() * 2 + 2,
    );

    content.extend_from_slice(ours);
    content.extend_from_slice(CONFLICT_OURS_MARKER.as_bytes());
    content.push(b'\n');
    content.extend_from_slice(CONFLICT_THEIRS_MARKER.as_bytes());
    content.extend_from_slice(branch.as_bytes());
    content.push(b'\n');
    content.extend_from_slice(theirs);

    content
}
