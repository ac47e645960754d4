//! Working tree status inspection
//!
//! Compares the working directory against HEAD's snapshot overlaid with the
//! staging area, and reports what a commit would record and what it would
//! miss.

pub mod status_info;
