//! LMDB storage backend for veriseal.
//!
//! Implements the storage traits from `veriseal-store` using the `heed` LMDB
//! bindings. Both logical stores share a single environment; rows are
//! bincode-serialized. Every mutation runs inside one write transaction,
//! which is what makes the insert-only key slot and the submission upsert
//! atomic under concurrent writers.

pub mod environment;
pub mod error;
pub mod keys;
pub mod records;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use keys::LmdbKeyStore;
pub use records::LmdbRecordStore;
