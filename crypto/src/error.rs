use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Wrong password, wrong key, or tampered/corrupted ciphertext.
    ///
    /// Deliberately a single variant: callers must not be able to tell a bad
    /// password apart from a modified blob.
    #[error("decryption failed: wrong key or modified ciphertext")]
    WrongKeyOrCorrupted,

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}
