use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::VcError;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self, VcError> {
        let name = name.into();

        if name.is_empty() {
            return Err(VcError::InvalidBranchName(
                "branch name cannot be empty".to_string(),
            ));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .map_err(|e| VcError::InvalidBranchName(format!("invalid name pattern: {e}")))?;

        if re.is_match(&name) {
            Err(VcError::InvalidBranchName(name))
        } else {
            Ok(Self(name))
        }
    }
}

impl TryFrom<String> for BranchName {
    type Error = VcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(value)
    }
}

impl From<BranchName> for String {
    fn from(value: BranchName) -> Self {
        value.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BranchName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
