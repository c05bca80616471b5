//! Key-record storage trait.

use serde::{Deserialize, Serialize};
use veriseal_types::{PublicKey, Timestamp};

use crate::StoreError;

/// The system-wide key-pair record.
///
/// All user data is sealed under `public_key`. The secret half is stored
/// twice: wrapped under the administrator password (`protected_key`, the
/// ASCII-safe blob) and symmetrically encrypted under the unlocked user key
/// (`encrypted_private_key`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyRecord {
    pub public_key: PublicKey,
    pub protected_key: String,
    pub encrypted_private_key: Vec<u8>,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Trait for storing the single enabled key record.
///
/// The slot is logical: at most one enabled record exists system-wide, and
/// implementations enforce that structurally rather than by filtering.
pub trait KeyStore {
    /// The enabled key record, or `None` when the system is unprovisioned.
    ///
    /// Callers that need to encrypt or decrypt must treat `None` as a
    /// configuration error, never as a silent no-op.
    fn active_key(&self) -> Result<Option<KeyRecord>, StoreError>;

    /// Insert the key record. Insert-only: fails with
    /// [`StoreError::Duplicate`] when a record already exists, leaving the
    /// existing record untouched.
    fn insert_key(&self, record: &KeyRecord) -> Result<(), StoreError>;
}
