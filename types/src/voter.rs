//! Opaque voter identifier used for vote attribution.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypeError;

/// Identifies the acting user. The board never interprets the contents.
///
/// Always trimmed and non-empty; deserialization goes through the same
/// validation as [`VoterId::parse`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct VoterId(String);

impl VoterId {
    /// Longest accepted identifier, in bytes.
    pub const MAX_LEN: usize = 128;

    pub fn parse(raw: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidVoter("empty".to_string()));
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(TypeError::InvalidVoter(format!(
                "longer than {} bytes",
                Self::MAX_LEN
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VoterId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims() {
        assert_eq!(VoterId::parse("  alice ").unwrap().as_str(), "alice");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(VoterId::parse("   ").is_err());
    }

    #[test]
    fn parse_rejects_oversized() {
        let raw = "x".repeat(VoterId::MAX_LEN + 1);
        assert!(VoterId::parse(raw).is_err());
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<VoterId>("\"\"").is_err());
        let v: VoterId = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(v.as_str(), "bob");
    }
}
