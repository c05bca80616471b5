//! Cryptographic primitives for veriseal.
//!
//! - **Sealed boxes** (X25519 + ChaCha20-Poly1305) for anonymous at-rest
//!   encryption of verification data and uploaded documents
//! - **Symmetric AEAD** (ChaCha20-Poly1305) protecting the asymmetric secret
//!   key under the session-bound user key
//! - **Password-protected key wrapper** (Argon2id + AES-256-GCM) unlocking
//!   the user key from an administrator password
//! - **Blake2b** for key and nonce derivation
//! - ASCII-safe (hex) encodings for cookie and database storage

pub mod encoding;
pub mod error;
pub mod hash;
pub mod keys;
pub mod protected;
pub mod sealed;
pub mod symmetric;

pub use encoding::{decode_user_key, encode_user_key};
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{generate_keypair, keypair_from_parts, keypair_from_secret, public_from_secret};
pub use protected::ProtectedKey;
pub use sealed::{open, seal, SEALED_OVERHEAD};
pub use symmetric::{decrypt_symmetric, encrypt_symmetric};
