//! A small local version-control engine
//!
//! Files are stored as content-addressed blobs, commits as immutable records
//! linked into a branch-local and a global chain, and the repository state
//! (HEAD, branches, staging area) as a single snapshot rewritten after every
//! mutating operation.
//!
//! ```no_run
//! use minivc::Repository;
//! use std::path::Path;
//!
//! # fn main() -> minivc::VcResult<()> {
//! let mut repository = Repository::init(Path::new("project"))?;
//! repository.add_all()?;
//! repository.commit("first snapshot")?;
//! repository.save()?;
//! # Ok(())
//! # }
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;

pub use areas::repository::{Repository, RepositoryState};
pub use artifacts::checkout::target::CheckoutTarget;
pub use artifacts::log::rev_list::LogScope;
pub use config::Config;
pub use errors::{VcError, VcResult};
