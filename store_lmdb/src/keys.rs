//! LMDB implementation of KeyStore.
//!
//! The key table is a single fixed slot: one LMDB entry under a constant
//! key. Insertion into an occupied slot fails inside the same write
//! transaction that checked it, so the "at most one enabled key" invariant
//! holds under concurrent provisioning attempts.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use veriseal_store::keys::{KeyRecord, KeyStore};
use veriseal_store::StoreError;

use crate::LmdbError;

const ACTIVE_SLOT: &[u8] = b"active";

pub struct LmdbKeyStore {
    pub(crate) env: Arc<Env>,
    pub(crate) keys_db: Database<Bytes, Bytes>,
}

impl KeyStore for LmdbKeyStore {
    fn active_key(&self) -> Result<Option<KeyRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .keys_db
            .get(&rtxn, ACTIVE_SLOT)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let record: KeyRecord = bincode::deserialize(bytes)
                    .map_err(|e| LmdbError::Serialization(e.to_string()))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn insert_key(&self, record: &KeyRecord) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        if self
            .keys_db
            .get(&wtxn, ACTIVE_SLOT)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate("key record".into()));
        }

        let bytes = bincode::serialize(record)
            .map_err(|e| LmdbError::Serialization(e.to_string()))?;
        self.keys_db
            .put(&mut wtxn, ACTIVE_SLOT, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriseal_types::{PublicKey, Timestamp};

    fn open_test_env() -> (tempfile::TempDir, crate::LmdbEnvironment) {
        let dir = tempfile::tempdir().unwrap();
        let env = crate::LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
        (dir, env)
    }

    fn test_record(tag: u8) -> KeyRecord {
        KeyRecord {
            public_key: PublicKey([tag; 32]),
            protected_key: "56500100".into(),
            encrypted_private_key: vec![tag; 60],
            enabled: true,
            created_at: Timestamp::new(1000),
            updated_at: Timestamp::new(1000),
        }
    }

    #[test]
    fn empty_slot_reads_none() {
        let (_dir, env) = open_test_env();
        assert!(env.key_store().active_key().unwrap().is_none());
    }

    #[test]
    fn insert_then_read_back() {
        let (_dir, env) = open_test_env();
        let store = env.key_store();

        store.insert_key(&test_record(1)).unwrap();
        let active = store.active_key().unwrap().unwrap();
        assert_eq!(active.public_key, PublicKey([1u8; 32]));
        assert!(active.enabled);
    }

    #[test]
    fn second_insert_fails_without_mutation() {
        let (_dir, env) = open_test_env();
        let store = env.key_store();

        store.insert_key(&test_record(1)).unwrap();
        assert!(matches!(
            store.insert_key(&test_record(2)),
            Err(StoreError::Duplicate(_))
        ));
        let active = store.active_key().unwrap().unwrap();
        assert_eq!(active.public_key, PublicKey([1u8; 32]));
    }
}
