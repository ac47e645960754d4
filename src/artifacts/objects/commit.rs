//! Commit record
//!
//! Commits are immutable snapshots of every tracked file. Each commit links to
//! two predecessors:
//! - `prev_commit`: the previous commit on the same branch (branch-local chain)
//! - `global_prev_commit`: the previous commit in the whole repository,
//!   regardless of branch (global chain)
//!
//! A commit finalizing a merge additionally records the merged branch head in
//! `merge_parent`.
//!
//! ## Identity
//!
//! The commit hash is the SHA-1 of a canonical rendering of every field:
//!
//! ```text
//! prev <branch-parent or ->
//! global <global-parent or ->
//! merge <merge-parent or ->
//! branch <branch>
//! author <name> <email>
//! timestamp <rfc3339>
//! file <blob-hash> <filename>      (one per tracked file, sorted)
//! removed <filename>               (one per removed file, sorted)
//!
//! <commit message>
//! ```

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcError, VcResult};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping of working-relative filename to blob id
pub type FileSet = BTreeMap<String, ObjectId>;

/// Author information
///
/// Contains name, email, and the moment the commit was recorded.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author with the current timestamp
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    /// Create a new author with a specific timestamp
    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Parse a timestamp given either in RFC 2822 or as `%Y-%m-%d %H:%M:%S %z`
    pub fn parse_timestamp(date_str: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        chrono::DateTime::parse_from_rfc2822(date_str)
            .or_else(|_| chrono::DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S %z"))
            .ok()
    }

    /// Format author name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

/// Everything needed to create a commit, before its hash is known
#[derive(Debug, Clone, new)]
pub struct NewCommit {
    pub prev_commit: Option<ObjectId>,
    pub global_prev_commit: Option<ObjectId>,
    pub merge_parent: Option<ObjectId>,
    pub branch: BranchName,
    pub message: String,
    pub author: Author,
    pub staged_files: FileSet,
    pub removed_files: BTreeSet<String>,
}

/// Immutable commit record
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    hash: ObjectId,
    message: String,
    author: Author,
    branch: BranchName,
    /// Full snapshot: every tracked file at this commit, not only the changes
    staged_files: FileSet,
    /// Files removed relative to the previous snapshot (informational)
    removed_files: BTreeSet<String>,
    prev_commit: Option<ObjectId>,
    global_prev_commit: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    merge_parent: Option<ObjectId>,
}

impl Commit {
    /// Seal a draft into a commit, computing its identity
    ///
    /// Fails with [`VcError::EmptyMessage`] if the message is blank.
    pub fn build(draft: NewCommit) -> VcResult<Self> {
        let message = draft.message.trim().to_string();
        if message.is_empty() {
            return Err(VcError::EmptyMessage);
        }

        let mut commit = Commit {
            hash: ObjectId::default(),
            message,
            author: draft.author,
            branch: draft.branch,
            staged_files: draft.staged_files,
            removed_files: draft.removed_files,
            prev_commit: draft.prev_commit,
            global_prev_commit: draft.global_prev_commit,
            merge_parent: draft.merge_parent,
        };
        commit.hash = commit.compute_hash();

        Ok(commit)
    }

    /// Recompute the identity from the record's fields
    pub fn compute_hash(&self) -> ObjectId {
        let link = |oid: &Option<ObjectId>| {
            oid.as_ref()
                .map(|oid| oid.to_string())
                .unwrap_or_else(|| "-".to_string())
        };

        let mut lines = vec![
            format!("prev {}", link(&self.prev_commit)),
            format!("global {}", link(&self.global_prev_commit)),
            format!("merge {}", link(&self.merge_parent)),
            format!("branch {}", self.branch),
            format!("author {}", self.author.display_name()),
            format!("timestamp {}", self.author.timestamp().to_rfc3339()),
        ];
        lines.extend(
            self.staged_files
                .iter()
                .map(|(name, oid)| format!("file {oid} {name}")),
        );
        lines.extend(self.removed_files.iter().map(|name| format!("removed {name}")));
        lines.push(String::new());
        lines.push(self.message.clone());

        ObjectId::digest(lines.join("\n").as_bytes())
    }

    pub fn hash(&self) -> &ObjectId {
        &self.hash
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.author.timestamp()
    }

    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub fn staged_files(&self) -> &FileSet {
        &self.staged_files
    }

    pub fn removed_files(&self) -> &BTreeSet<String> {
        &self.removed_files
    }

    /// Look up the blob a file had at this commit
    pub fn file(&self, name: &str) -> Option<&ObjectId> {
        self.staged_files.get(name)
    }

    pub fn prev_commit(&self) -> Option<&ObjectId> {
        self.prev_commit.as_ref()
    }

    pub fn global_prev_commit(&self) -> Option<&ObjectId> {
        self.global_prev_commit.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.global_prev_commit.is_none()
    }
}
