//! Branch names
//!
//! Branch names share the validation rules of git ref names so that anything
//! accepted here is also a sensible name in other tools.

pub mod branch_name;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Branch created by `init`, unless the configuration says otherwise
pub const DEFAULT_BRANCH: &str = "master";
