//! Object identities and records
//!
//! The repository stores two kinds of immutable objects, both addressed by a
//! SHA-1 digest:
//!
//! - **Blob**: the raw bytes of one file, keyed by the digest of those bytes
//! - **Commit**: a full snapshot record (filename -> blob id) with its two
//!   parent chains, keyed by the digest of its canonical rendering

pub mod commit;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest abbreviated hash accepted when resolving commits
pub const MIN_PREFIX_LENGTH: usize = 4;
