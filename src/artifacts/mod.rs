//! Data types and algorithms
//!
//! - `branch`: validated branch names
//! - `checkout`: checkout targets and working-directory migrations
//! - `core`: pager output
//! - `log`: lazy history traversal
//! - `merge`: fork-point ancestry and three-way resolution
//! - `objects`: object ids, authors and commit records
//! - `status`: working tree status

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
