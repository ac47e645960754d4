//! Storage areas of a repository
//!
//! - `blob_store`: content-addressed file snapshots
//! - `commit_store`: immutable commit records
//! - `refs`: branch heads and fork points
//! - `index`: the staging area
//! - `workspace`: working directory access and reconciliation
//! - `repository`: the state snapshot tying the areas together

pub mod blob_store;
pub mod commit_store;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
