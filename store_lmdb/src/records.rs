//! LMDB implementation of RecordStore.
//!
//! Records are keyed by the user id's big-endian bytes. The submission
//! upsert performs its read-modify-write inside one write transaction, which
//! rules out the lost-update and duplicate-insert anomalies a select-then-
//! write sequence would allow under concurrent submissions.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use veriseal_store::records::{RecordStore, VerificationRecord};
use veriseal_store::StoreError;
use veriseal_types::{Timestamp, UserId, VerificationStatus};

use crate::LmdbError;

pub struct LmdbRecordStore {
    pub(crate) env: Arc<Env>,
    pub(crate) records_db: Database<Bytes, Bytes>,
}

fn decode(bytes: &[u8]) -> Result<VerificationRecord, LmdbError> {
    bincode::deserialize(bytes).map_err(|e| LmdbError::Serialization(e.to_string()))
}

fn encode(record: &VerificationRecord) -> Result<Vec<u8>, LmdbError> {
    bincode::serialize(record).map_err(|e| LmdbError::Serialization(e.to_string()))
}

impl RecordStore for LmdbRecordStore {
    fn get_record(&self, user: &UserId) -> Result<Option<VerificationRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .records_db
            .get(&rtxn, &user.to_be_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn upsert_submission(
        &self,
        user: &UserId,
        data: &[u8],
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let key = user.to_be_bytes();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        let record = match self
            .records_db
            .get(&wtxn, &key)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let mut record = decode(bytes)?;
                record.data = data.to_vec();
                record.status = VerificationStatus::Pending;
                record.updated_at = now;
                record
            }
            None => VerificationRecord {
                user_id: *user,
                data: data.to_vec(),
                status: VerificationStatus::Pending,
                comments: String::new(),
                created_at: now,
                updated_at: now,
            },
        };

        let bytes = encode(&record)?;
        self.records_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
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

        let key = user.to_be_bytes();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        let record = match self
            .records_db
            .get(&wtxn, &key)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let mut record = decode(bytes)?;
                record.status = status;
                record.comments = comments.to_string();
                record.updated_at = now;
                record
            }
            None => VerificationRecord {
                user_id: *user,
                data: Vec::new(),
                status,
                comments: comments.to_string(),
                created_at: now,
                updated_at: now,
            },
        };

        let bytes = encode(&record)?;
        self.records_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn status(&self, user: &UserId) -> Result<VerificationStatus, StoreError> {
        Ok(self
            .get_record(user)?
            .map(|r| r.status)
            .unwrap_or(VerificationStatus::None))
    }
}
