//! Password-protected key wrapper.
//!
//! Wraps a random 32-byte user key under a key-encryption-key derived from
//! an administrator password with Argon2id; the wrapping cipher is
//! AES-256-GCM. The ASCII-safe form embeds version, KDF parameters, salt,
//! and nonce, so the blob alone plus the correct password recovers the key.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroizing;

use veriseal_types::UserKey;

use crate::encoding::{decode_blob, encode_blob, PROTECTED_KEY_MAGIC};
use crate::error::CryptoError;

/// Argon2id parameters: 64 MB memory, 3 iterations, 1 lane of parallelism.
const ARGON2_MEMORY_KIB: u32 = 65536;
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;
const ARGON2_OUTPUT_LEN: usize = 32;

const SALT_SIZE: usize = 16;
const NONCE_SIZE: usize = 12;
/// Wrapped key size: 32-byte key + 16-byte GCM tag.
const WRAPPED_SIZE: usize = 48;
/// Fixed payload size of the ASCII-safe form (KDF params + salt + nonce + wrapped key).
const PAYLOAD_SIZE: usize = 12 + SALT_SIZE + NONCE_SIZE + WRAPPED_SIZE;

/// KDF parameters embedded in the wrapper blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: ARGON2_MEMORY_KIB,
            iterations: ARGON2_ITERATIONS,
            parallelism: ARGON2_PARALLELISM,
        }
    }
}

/// A random symmetric user key, wrapped under a password.
///
/// Only the correct password recovers the key; a wrong password and a
/// tampered blob fail identically.
pub struct ProtectedKey {
    kdf: KdfParams,
    salt: [u8; SALT_SIZE],
    nonce: [u8; NONCE_SIZE],
    ciphertext: Vec<u8>,
}

impl ProtectedKey {
    /// Create a wrapper around a freshly generated random user key.
    pub fn generate(password: &str) -> Result<Self, CryptoError> {
        let mut rng = rand::rngs::OsRng;

        let mut user_key = Zeroizing::new([0u8; 32]);
        rng.fill_bytes(&mut *user_key);

        let mut salt = [0u8; SALT_SIZE];
        rng.fill_bytes(&mut salt);
        let mut nonce = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut nonce);

        let kdf = KdfParams::default();
        let kek = derive_kek(password, &salt, &kdf)?;

        let cipher = Aes256Gcm::new_from_slice(kek.as_slice()).expect("valid key length");
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), user_key.as_slice())
            .map_err(|_| CryptoError::EncryptionFailed)?;

        Ok(Self {
            kdf,
            salt,
            nonce,
            ciphertext,
        })
    }

    /// Recover the wrapped user key.
    ///
    /// A wrong password, a tampered ciphertext, and mangled KDF parameters
    /// all yield [`CryptoError::WrongKeyOrCorrupted`]; no oracle separates
    /// them.
    pub fn unlock(&self, password: &str) -> Result<UserKey, CryptoError> {
        let kek = derive_kek(password, &self.salt, &self.kdf)
            .map_err(|_| CryptoError::WrongKeyOrCorrupted)?;

        let cipher = Aes256Gcm::new_from_slice(kek.as_slice()).expect("valid key length");
        let plaintext = cipher
            .decrypt(Nonce::from_slice(&self.nonce), self.ciphertext.as_ref())
            .map_err(|_| CryptoError::WrongKeyOrCorrupted)?;
        let plaintext = Zeroizing::new(plaintext);

        let bytes: [u8; 32] = plaintext
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::WrongKeyOrCorrupted)?;
        Ok(UserKey::from_bytes(bytes))
    }

    /// Serialize to the ASCII-safe portable form stored in the key record.
    pub fn to_ascii_safe(&self) -> String {
        let mut payload = Vec::with_capacity(PAYLOAD_SIZE);
        payload.extend_from_slice(&self.kdf.memory_kib.to_be_bytes());
        payload.extend_from_slice(&self.kdf.iterations.to_be_bytes());
        payload.extend_from_slice(&self.kdf.parallelism.to_be_bytes());
        payload.extend_from_slice(&self.salt);
        payload.extend_from_slice(&self.nonce);
        payload.extend_from_slice(&self.ciphertext);
        encode_blob(PROTECTED_KEY_MAGIC, &payload)
    }

    /// Parse the ASCII-safe form. Malformed input is indistinguishable from
    /// a corrupted blob.
    pub fn from_ascii_safe(encoded: &str) -> Result<Self, CryptoError> {
        let payload = decode_blob(PROTECTED_KEY_MAGIC, encoded)?;
        if payload.len() != PAYLOAD_SIZE {
            return Err(CryptoError::WrongKeyOrCorrupted);
        }

        let u32_at = |offset: usize| {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&payload[offset..offset + 4]);
            u32::from_be_bytes(buf)
        };
        let kdf = KdfParams {
            memory_kib: u32_at(0),
            iterations: u32_at(4),
            parallelism: u32_at(8),
        };

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&payload[12..12 + SALT_SIZE]);
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&payload[12 + SALT_SIZE..12 + SALT_SIZE + NONCE_SIZE]);
        let ciphertext = payload[12 + SALT_SIZE + NONCE_SIZE..].to_vec();

        Ok(Self {
            kdf,
            salt,
            nonce,
            ciphertext,
        })
    }

    pub fn kdf_params(&self) -> &KdfParams {
        &self.kdf
    }
}

/// Derive a 32-byte key-encryption-key from the password and salt.
fn derive_kek(
    password: &str,
    salt: &[u8],
    kdf: &KdfParams,
) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    let params = Params::new(
        kdf.memory_kib,
        kdf.iterations,
        kdf.parallelism,
        Some(ARGON2_OUTPUT_LEN),
    )
    .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut *output)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_recovers_wrapped_key() {
        let protected = ProtectedKey::generate("hunter2-but-longer").unwrap();
        let first = protected.unlock("hunter2-but-longer").unwrap();
        let second = protected.unlock("hunter2-but-longer").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn wrong_password_fails() {
        let protected = ProtectedKey::generate("correct-password").unwrap();
        assert_eq!(
            protected.unlock("wrong-password"),
            Err(CryptoError::WrongKeyOrCorrupted)
        );
    }

    #[test]
    fn ascii_safe_roundtrip() {
        let protected = ProtectedKey::generate("round-trip").unwrap();
        let key = protected.unlock("round-trip").unwrap();

        let encoded = protected.to_ascii_safe();
        assert!(encoded.chars().all(|c| c.is_ascii_hexdigit()));

        let reloaded = ProtectedKey::from_ascii_safe(&encoded).unwrap();
        assert_eq!(reloaded.unlock("round-trip").unwrap(), key);
    }

    #[test]
    fn wrong_password_and_corrupted_blob_are_indistinguishable() {
        let protected = ProtectedKey::generate("the-real-password").unwrap();
        let encoded = protected.to_ascii_safe();

        // Flip one bit inside the wrapped-key portion of the blob.
        let mut bytes = hex::decode(&encoded).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let corrupted = ProtectedKey::from_ascii_safe(&hex::encode(bytes)).unwrap();

        let wrong_password = protected.unlock("not-the-password");
        let correct_on_corrupted = corrupted.unlock("the-real-password");
        assert_eq!(wrong_password, correct_on_corrupted);
        assert_eq!(wrong_password, Err(CryptoError::WrongKeyOrCorrupted));
    }

    #[test]
    fn malformed_ascii_fails_like_corruption() {
        assert!(matches!(
            ProtectedKey::from_ascii_safe("zz-not-hex"),
            Err(CryptoError::WrongKeyOrCorrupted)
        ));
        assert!(matches!(
            ProtectedKey::from_ascii_safe(""),
            Err(CryptoError::WrongKeyOrCorrupted)
        ));
    }

    #[test]
    fn two_wrappers_for_same_password_differ() {
        let a = ProtectedKey::generate("same-password").unwrap();
        let b = ProtectedKey::generate("same-password").unwrap();
        // Fresh salt, nonce, and wrapped key every time.
        assert_ne!(a.to_ascii_safe(), b.to_ascii_safe());
    }

    #[test]
    fn kdf_params_survive_the_blob() {
        let protected = ProtectedKey::generate("params-check").unwrap();
        let reloaded = ProtectedKey::from_ascii_safe(&protected.to_ascii_safe()).unwrap();
        assert_eq!(reloaded.kdf_params(), &KdfParams::default());
    }
}
