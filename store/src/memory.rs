//! In-memory store for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use veriseal_types::{Timestamp, UserId, VerificationStatus};

use crate::keys::{KeyRecord, KeyStore};
use crate::records::{RecordStore, VerificationRecord};
use crate::StoreError;

/// A thread-safe in-memory key + record store.
pub struct MemoryStore {
    key: Mutex<Option<KeyRecord>>,
    records: Mutex<HashMap<u64, VerificationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            key: Mutex::new(None),
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore for MemoryStore {
    fn active_key(&self) -> Result<Option<KeyRecord>, StoreError> {
        Ok(self.key.lock().unwrap().clone())
    }

    fn insert_key(&self, record: &KeyRecord) -> Result<(), StoreError> {
        let mut slot = self.key.lock().unwrap();
        if slot.is_some() {
            return Err(StoreError::Duplicate("key record".into()));
        }
        *slot = Some(record.clone());
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn get_record(&self, user: &UserId) -> Result<Option<VerificationRecord>, StoreError> {
        Ok(self.records.lock().unwrap().get(&user.as_u64()).cloned())
    }

    fn upsert_submission(
        &self,
        user: &UserId,
        data: &[u8],
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&user.as_u64()) {
            Some(record) => {
                record.data = data.to_vec();
                record.status = VerificationStatus::Pending;
                record.updated_at = now;
            }
            None => {
                records.insert(
                    user.as_u64(),
                    VerificationRecord {
                        user_id: *user,
                        data: data.to_vec(),
                        status: VerificationStatus::Pending,
                        comments: String::new(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        Ok(())
    }

    fn set_review(
        &self,
        user: &UserId,
        status: VerificationStatus,
        comments: &str,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        if !status.is_persistable() {
            return Err(StoreError::InvalidStatus(status.as_str().into()));
        }
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&user.as_u64()) {
            Some(record) => {
                record.status = status;
                record.comments = comments.to_string();
                record.updated_at = now;
            }
            None => {
                records.insert(
                    user.as_u64(),
                    VerificationRecord {
                        user_id: *user,
                        data: Vec::new(),
                        status,
                        comments: comments.to_string(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        Ok(())
    }

    fn status(&self, user: &UserId) -> Result<VerificationStatus, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&user.as_u64())
            .map(|r| r.status)
            .unwrap_or(VerificationStatus::None))
    }
}
