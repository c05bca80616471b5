use thiserror::Error;

use veriseal_crypto::CryptoError;
use veriseal_records::RecordError;
use veriseal_store::StoreError;

use crate::password::ValidationError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No key record is provisioned: the system is not ready.
    #[error("verification keys are not provisioned")]
    NotConfigured,

    /// No unlocked user key is available for this session.
    #[error("cannot decrypt: no unlocked user key for this session")]
    CannotDecrypt,

    /// A key record already exists; provisioning is insert-only.
    #[error("keys exist")]
    KeysExist,

    #[error("permission denied: not an authorized reviewer")]
    PermissionDenied,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("file {name} is too large: {size} bytes (limit {max})")]
    FileTooLarge { name: String, size: u64, max: u64 },

    #[error("invalid filename: {0}")]
    InvalidFilename(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("filesystem error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        ServiceError::Io(e.to_string())
    }
}
