//! Abstract storage traits for veriseal.
//!
//! Every storage backend (LMDB, the host platform's relational store, an
//! in-memory store for testing) implements these traits. The rest of the
//! codebase depends only on the traits; read/write routing is the backend's
//! concern.

pub mod error;
pub mod keys;
pub mod memory;
pub mod records;

pub use error::StoreError;
pub use keys::{KeyRecord, KeyStore};
pub use memory::MemoryStore;
pub use records::{RecordStore, VerificationRecord};
