//! Verification status of a user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The review status of a user's verification record.
///
/// `None` is synthetic: it means "no record exists" and is only ever returned
/// to callers when the store has no row for the user. It must never be
/// persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// No verification record exists for the user.
    None,
    /// A submission is awaiting administrator review.
    Pending,
    /// An administrator confirmed the submitted identity.
    Verified,
    /// Verification was waived for this user.
    NotRequired,
}

impl VerificationStatus {
    /// Whether the user counts as verified for gating purposes.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified | Self::NotRequired)
    }

    /// Whether this value may be written to the store.
    pub fn is_persistable(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The canonical string stored in the record row.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::NotRequired => "not_required",
        }
    }

    /// Parse the stored string form. Unknown strings yield `None` (absent).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "not_required" => Some(Self::NotRequired),
            _ => None,
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verified_and_not_required_gate_open() {
        assert!(VerificationStatus::Verified.is_verified());
        assert!(VerificationStatus::NotRequired.is_verified());
        assert!(!VerificationStatus::Pending.is_verified());
        assert!(!VerificationStatus::None.is_verified());
    }

    #[test]
    fn none_is_not_persistable() {
        assert!(!VerificationStatus::None.is_persistable());
        assert!(VerificationStatus::Pending.is_persistable());
    }

    #[test]
    fn string_roundtrip() {
        for status in [
            VerificationStatus::None,
            VerificationStatus::Pending,
            VerificationStatus::Verified,
            VerificationStatus::NotRequired,
        ] {
            assert_eq!(VerificationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(VerificationStatus::parse("bogus"), None);
    }

    #[test]
    fn serde_uses_snake_case_strings() {
        let encoded = serde_json::to_string(&VerificationStatus::NotRequired).unwrap();
        assert_eq!(encoded, "\"not_required\"");
    }
}
