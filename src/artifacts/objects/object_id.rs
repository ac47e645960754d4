//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. Blobs and
//! commits share the same identifier type; the store they live in decides
//! how the id is resolved.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc1234")

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::VcError;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Object identifier (SHA-1 hash)
///
/// Serialized as its hex string; deserialization re-validates it.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    pub fn try_parse(id: impl Into<String>) -> Result<Self, VcError> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(VcError::InvalidObjectId(format!(
                "{id} (expected {OBJECT_ID_LENGTH} characters, got {})",
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VcError::InvalidObjectId(id));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Digest arbitrary bytes into an object ID
    pub fn digest(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Check whether this id starts with the given (case-insensitive) prefix
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.to_ascii_lowercase())
    }

    /// Get abbreviated form of the object ID
    ///
    /// # Returns
    ///
    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl TryFrom<String> for ObjectId {
    type Error = VcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(value: ObjectId) -> Self {
        value.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn digest_matches_known_sha1() {
        let oid = ObjectId::digest(b"hello world");

        assert_eq!(oid.as_ref(), "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        assert_eq!(oid.to_short_oid(), "2aae6c3");
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("zzae6c35c94fcfb415dbe95f408b9ce91ee846ed")]
    #[case("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed0")]
    fn rejects_malformed_ids(#[case] id: &str) {
        assert!(matches!(
            ObjectId::try_parse(id),
            Err(VcError::InvalidObjectId(_))
        ));
    }

    #[test]
    fn parsing_normalizes_case() {
        let oid = ObjectId::try_parse("2AAE6C35C94FCFB415DBE95F408B9CE91EE846ED").unwrap();

        assert_eq!(oid, ObjectId::digest(b"hello world"));
        assert!(oid.matches_prefix("2AAE"));
    }

    #[test]
    fn serde_round_trip_revalidates() {
        let oid = ObjectId::digest(b"content");
        let json = serde_json::to_string(&oid).unwrap();

        assert_eq!(json, format!("\"{oid}\""));
        assert_eq!(serde_json::from_str::<ObjectId>(&json).unwrap(), oid);
        assert!(serde_json::from_str::<ObjectId>("\"nothex\"").is_err());
    }
}
