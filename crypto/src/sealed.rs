//! Anonymous sealed-box encryption.
//!
//! Each seal uses a fresh ephemeral X25519 key pair: the payload key is
//! derived from the Diffie-Hellman shared secret and both public keys, the
//! nonce from the two public keys alone, and the wire format is
//! `ephemeral_public_key(32) || ChaCha20-Poly1305 ciphertext`. The ciphertext
//! reveals nothing about who produced it; only the holder of the matching
//! secret key can open it.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use x25519_dalek::{PublicKey as X25519Public, StaticSecret};

use rand::rngs::OsRng;
use veriseal_types::{KeyPair, PublicKey};

use crate::error::CryptoError;
use crate::hash::blake2b_256_multi;

/// Domain separator for payload-key derivation.
const SEAL_KEY_DOMAIN: &[u8] = b"veriseal-sealed-box-key-v1";

/// Domain separator for nonce derivation.
const SEAL_NONCE_DOMAIN: &[u8] = b"veriseal-sealed-box-nonce-v1";

/// Bytes a sealed box adds on top of the plaintext length
/// (32-byte ephemeral public key + 16-byte Poly1305 tag).
pub const SEALED_OVERHEAD: usize = 32 + 16;

fn derive_payload_key(shared: &[u8; 32], ephemeral_pk: &[u8; 32], recipient_pk: &[u8; 32]) -> [u8; 32] {
    blake2b_256_multi(&[SEAL_KEY_DOMAIN, shared, ephemeral_pk, recipient_pk])
}

/// The nonce is a function of the two public keys, unique per seal because
/// the ephemeral key is.
fn derive_nonce(ephemeral_pk: &[u8; 32], recipient_pk: &[u8; 32]) -> [u8; 12] {
    let digest = blake2b_256_multi(&[SEAL_NONCE_DOMAIN, ephemeral_pk, recipient_pk]);
    let mut nonce = [0u8; 12];
    nonce.copy_from_slice(&digest[..12]);
    nonce
}

/// Seal `plaintext` so that only the holder of the secret key matching
/// `recipient` can open it.
pub fn seal(plaintext: &[u8], recipient: &PublicKey) -> Result<Vec<u8>, CryptoError> {
    let ephemeral_secret = StaticSecret::random_from_rng(OsRng);
    let ephemeral_public = X25519Public::from(&ephemeral_secret);
    let recipient_public = X25519Public::from(*recipient.as_bytes());

    let shared = ephemeral_secret.diffie_hellman(&recipient_public);
    let key = derive_payload_key(
        shared.as_bytes(),
        ephemeral_public.as_bytes(),
        recipient.as_bytes(),
    );
    let cipher = ChaCha20Poly1305::new_from_slice(&key).expect("valid key length");
    let nonce = derive_nonce(ephemeral_public.as_bytes(), recipient.as_bytes());

    let ciphertext = cipher
        .encrypt(&Nonce::from(nonce), plaintext)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut sealed = Vec::with_capacity(32 + ciphertext.len());
    sealed.extend_from_slice(ephemeral_public.as_bytes());
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Open a sealed box with a key pair reconstructed from the stored secret
/// and public halves.
///
/// An empty input is "no data", not an error: it returns an empty plaintext
/// without touching the cipher. Truncated or tampered input fails with
/// [`CryptoError::WrongKeyOrCorrupted`].
pub fn open(sealed: &[u8], keypair: &KeyPair) -> Result<Vec<u8>, CryptoError> {
    if sealed.is_empty() {
        return Ok(Vec::new());
    }
    if sealed.len() < SEALED_OVERHEAD {
        return Err(CryptoError::WrongKeyOrCorrupted);
    }

    let mut ephemeral_pk = [0u8; 32];
    ephemeral_pk.copy_from_slice(&sealed[..32]);
    let ephemeral_public = X25519Public::from(ephemeral_pk);

    let recipient_secret = StaticSecret::from(*keypair.secret.as_bytes());
    let shared = recipient_secret.diffie_hellman(&ephemeral_public);
    let key = derive_payload_key(shared.as_bytes(), &ephemeral_pk, keypair.public.as_bytes());
    let cipher = ChaCha20Poly1305::new_from_slice(&key).expect("valid key length");
    let nonce = derive_nonce(&ephemeral_pk, keypair.public.as_bytes());

    cipher
        .decrypt(&Nonce::from(nonce), &sealed[32..])
        .map_err(|_| CryptoError::WrongKeyOrCorrupted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_parts};
    use veriseal_types::SecretKey;

    #[test]
    fn seal_open_roundtrip() {
        let kp = generate_keypair();
        let plaintext = b"identity document contents";

        let sealed = seal(plaintext, &kp.public).unwrap();
        assert_eq!(sealed.len(), plaintext.len() + SEALED_OVERHEAD);
        assert_ne!(&sealed[32..32 + plaintext.len()], plaintext.as_slice());

        let opened = open(&sealed, &kp).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn opens_with_externally_reconstructed_keypair() {
        let kp = generate_keypair();
        let sealed = seal(b"payload", &kp.public).unwrap();

        // Rebuild the pair from stored halves, as the decrypt path does.
        let rebuilt = keypair_from_parts(SecretKey(*kp.secret.as_bytes()), kp.public.clone());
        assert_eq!(open(&sealed, &rebuilt).unwrap(), b"payload");
    }

    #[test]
    fn two_seals_of_same_plaintext_differ() {
        let kp = generate_keypair();
        let a = seal(b"same", &kp.public).unwrap();
        let b = seal(b"same", &kp.public).unwrap();
        // Fresh ephemeral key per seal.
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_secret_key_fails() {
        let kp = generate_keypair();
        let other = generate_keypair();
        let sealed = seal(b"secret data", &kp.public).unwrap();

        let wrong = keypair_from_parts(SecretKey(*other.secret.as_bytes()), kp.public.clone());
        assert_eq!(open(&sealed, &wrong), Err(CryptoError::WrongKeyOrCorrupted));
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let kp = generate_keypair();
        let mut sealed = seal(b"secret data", &kp.public).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xFF;
        assert_eq!(open(&sealed, &kp), Err(CryptoError::WrongKeyOrCorrupted));
    }

    #[test]
    fn truncated_input_fails() {
        let kp = generate_keypair();
        let sealed = seal(b"secret data", &kp.public).unwrap();
        assert_eq!(
            open(&sealed[..SEALED_OVERHEAD - 1], &kp),
            Err(CryptoError::WrongKeyOrCorrupted)
        );
    }

    #[test]
    fn empty_input_is_absent_data() {
        let kp = generate_keypair();
        assert_eq!(open(&[], &kp).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn empty_plaintext_still_seals() {
        let kp = generate_keypair();
        let sealed = seal(b"", &kp.public).unwrap();
        assert_eq!(sealed.len(), SEALED_OVERHEAD);
        assert_eq!(open(&sealed, &kp).unwrap(), Vec::<u8>::new());
    }
}
