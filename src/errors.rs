//! Error types for repository operations
//!
//! Every failure a repository operation can report is one of the variants
//! below. Precondition failures are detected before any state is mutated;
//! `Io` failures abort the current operation and leave the persisted
//! snapshot untouched, since the snapshot is always written last.

use crate::artifacts::branch::branch_name::BranchName;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcError {
    #[error("not a minivc repository (or any parent): {0}")]
    NotInitialized(PathBuf),

    #[error("a minivc repository already exists in {0}")]
    AlreadyInitialized(PathBuf),

    #[error("please enter a commit message")]
    EmptyMessage,

    #[error("no changes added to the commit")]
    NoChanges,

    #[error("file is not staged or tracked: {0}")]
    NotStaged(String),

    #[error("file {file} does not exist in commit {commit}")]
    FileNotInCommit { file: String, commit: String },

    #[error("a branch named '{0}' already exists")]
    BranchExists(BranchName),

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("cannot delete branch '{0}' while it is checked out")]
    CannotDeleteCurrent(BranchName),

    #[error("cannot delete branch '{branch}': branches forked from it still exist: {}", .descendants.join(", "))]
    BranchHasDescendants {
        branch: BranchName,
        descendants: Vec<String>,
    },

    #[error("no commit with hash {0} exists")]
    CommitNotFound(String),

    #[error("short commit hash {prefix} is ambiguous: {}", .candidates.join(", "))]
    AmbiguousCommit {
        prefix: String,
        candidates: Vec<String>,
    },

    #[error("blob {hash} has no stored file named {file}")]
    NotFound { hash: String, file: String },

    #[error("branches '{current}' and '{other}' have no common ancestor")]
    NoCommonAncestor { current: String, other: String },

    #[error("cannot merge branch '{0}' with itself")]
    CannotMergeCurrent(BranchName),

    #[error("you have staged changes; commit them before merging")]
    UncommittedChanges,

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid checkout arguments: {0}")]
    InvalidCheckout(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl VcError {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        VcError::Io {
            context: context.into(),
            source,
        }
    }

    /// check if this error indicates a missing branch, commit, file or blob
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VcError::NotStaged(_)
                | VcError::FileNotInCommit { .. }
                | VcError::BranchNotFound(_)
                | VcError::CommitNotFound(_)
                | VcError::NotFound { .. }
        )
    }

    /// check if this error was raised before anything was mutated
    pub fn is_precondition(&self) -> bool {
        !matches!(
            self,
            VcError::Io { .. } | VcError::Serialization(_) | VcError::Config(_)
        )
    }
}

/// Attach context to `std::io::Result` values, in the spirit of
/// `anyhow::Context` but producing a typed [`VcError::Io`].
pub trait IoContext<T> {
    fn io_context<C, F>(self, context: F) -> VcResult<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<C, F>(self, context: F) -> VcResult<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|source| VcError::io(context(), source))
    }
}

pub type VcResult<T> = Result<T, VcError>;
