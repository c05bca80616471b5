//! Symmetric authenticated encryption under the session user key.
//!
//! Used for exactly one thing: protecting the asymmetric secret key at rest.
//! Wire format is `nonce(12) || ChaCha20-Poly1305 ciphertext`.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use veriseal_types::UserKey;

use crate::error::CryptoError;

const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

/// Encrypt `plaintext` under the user key with a random nonce.
pub fn encrypt_symmetric(plaintext: &[u8], key: &UserKey) -> Result<Vec<u8>, CryptoError> {
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes()).expect("valid key length");

    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(&Nonce::from(nonce), plaintext)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt data produced by [`encrypt_symmetric`].
///
/// An empty input is "no data", not an error: it returns an empty plaintext
/// without touching the cipher. A wrong key and a tampered ciphertext both
/// fail with the same [`CryptoError::WrongKeyOrCorrupted`].
pub fn decrypt_symmetric(data: &[u8], key: &UserKey) -> Result<Vec<u8>, CryptoError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    if data.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::WrongKeyOrCorrupted);
    }

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes()).expect("valid key length");

    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&data[..NONCE_SIZE]);

    cipher
        .decrypt(&Nonce::from(nonce), &data[NONCE_SIZE..])
        .map_err(|_| CryptoError::WrongKeyOrCorrupted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(byte: u8) -> UserKey {
        UserKey::from_bytes([byte; 32])
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let key = test_key(7);
        let plaintext = b"asymmetric secret key bytes";

        let ciphertext = encrypt_symmetric(plaintext, &key).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + NONCE_SIZE + TAG_SIZE);

        let decrypted = decrypt_symmetric(&ciphertext, &key).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn nonces_are_fresh_per_call() {
        let key = test_key(7);
        let a = encrypt_symmetric(b"same", &key).unwrap();
        let b = encrypt_symmetric(b"same", &key).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails() {
        let ciphertext = encrypt_symmetric(b"data", &test_key(1)).unwrap();
        assert_eq!(
            decrypt_symmetric(&ciphertext, &test_key(2)),
            Err(CryptoError::WrongKeyOrCorrupted)
        );
    }

    #[test]
    fn tampered_ciphertext_fails_same_as_wrong_key() {
        let key = test_key(1);
        let mut ciphertext = encrypt_symmetric(b"data", &key).unwrap();
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0x01;

        let tampered = decrypt_symmetric(&ciphertext, &key);
        let wrong_key = decrypt_symmetric(&encrypt_symmetric(b"data", &key).unwrap(), &test_key(2));
        assert_eq!(tampered, wrong_key);
    }

    #[test]
    fn empty_input_is_absent_data() {
        assert_eq!(decrypt_symmetric(&[], &test_key(1)).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn short_garbage_fails() {
        assert_eq!(
            decrypt_symmetric(&[0u8; 5], &test_key(1)),
            Err(CryptoError::WrongKeyOrCorrupted)
        );
    }
}
