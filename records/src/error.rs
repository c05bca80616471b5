use thiserror::Error;

use veriseal_crypto::CryptoError;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("field-set serialization failed: {0}")]
    Json(String),
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Json(e.to_string())
    }
}
