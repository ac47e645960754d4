//! Repository operations
//!
//! Each file adds one operation to [`Repository`](crate::areas::repository::Repository).
//! Operations mutate the in-memory state only; persisting it with
//! `Repository::save` is left to the caller.
//!
//! - `init`: create a repository with its root commit
//! - `add`: stage files
//! - `rm`: schedule files for removal
//! - `commit`: record the staging area
//! - `status`: compare the working directory with HEAD and the staging area
//! - `log`: walk branch-local or global history
//! - `checkout`: create or switch branches, restore files
//! - `branch`: list and delete branches
//! - `reset`: rewind to an earlier commit
//! - `merge`: three-way merge of another branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
