//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::keys::LmdbKeyStore;
use crate::records::LmdbRecordStore;
use crate::LmdbError;

const MAX_DBS: u32 = 4;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    keys_db: Database<Bytes, Bytes>,
    records_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory must already exist.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(MAX_DBS)
                .map_size(map_size)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let keys_db = env.create_database(&mut wtxn, Some("verification_keys"))?;
        let records_db = env.create_database(&mut wtxn, Some("verification_records"))?;
        wtxn.commit()?;

        Ok(Self {
            env: Arc::new(env),
            keys_db,
            records_db,
        })
    }

    pub fn key_store(&self) -> LmdbKeyStore {
        LmdbKeyStore {
            env: self.env.clone(),
            keys_db: self.keys_db,
        }
    }

    pub fn record_store(&self) -> LmdbRecordStore {
        LmdbRecordStore {
            env: self.env.clone(),
            records_db: self.records_db,
        }
    }
}
