//! Verification-record storage trait.

use serde::{Deserialize, Serialize};
use veriseal_types::{Timestamp, UserId, VerificationStatus};

use crate::StoreError;

/// One verification record per user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub user_id: UserId,
    /// Sealed field-set blob; empty when the record was created by a review
    /// action before any submission.
    pub data: Vec<u8>,
    pub status: VerificationStatus,
    pub comments: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Trait for storing verification records, keyed uniquely by user id.
pub trait RecordStore {
    /// Fetch the user's record, if any.
    fn get_record(&self, user: &UserId) -> Result<Option<VerificationRecord>, StoreError>;

    /// Write a submission: insert a new pending record, or atomically update
    /// the existing one in place, replacing its data and resetting the
    /// status to [`VerificationStatus::Pending`]. Comments are preserved on
    /// update.
    fn upsert_submission(
        &self,
        user: &UserId,
        data: &[u8],
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// Write a review outcome: status and comments change, data is
    /// untouched. Inserts a data-less record when none exists (e.g. marking
    /// a user `not_required` before any submission). Rejects the synthetic
    /// [`VerificationStatus::None`] with [`StoreError::InvalidStatus`].
    fn set_review(
        &self,
        user: &UserId,
        status: VerificationStatus,
        comments: &str,
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// The user's status; [`VerificationStatus::None`] when no record exists.
    fn status(&self, user: &UserId) -> Result<VerificationStatus, StoreError>;
}
