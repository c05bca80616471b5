//! X25519 key-pair generation and reconstruction.

use rand::rngs::OsRng;
use veriseal_types::{KeyPair, PublicKey, SecretKey};
use x25519_dalek::{PublicKey as X25519Public, StaticSecret};

/// Generate a new X25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let secret = StaticSecret::random_from_rng(OsRng);
    let public = X25519Public::from(&secret);
    KeyPair {
        public: PublicKey(public.to_bytes()),
        secret: SecretKey(secret.to_bytes()),
    }
}

/// Derive the public key from a secret key.
pub fn public_from_secret(secret: &SecretKey) -> PublicKey {
    let secret = StaticSecret::from(*secret.as_bytes());
    PublicKey(X25519Public::from(&secret).to_bytes())
}

/// Reconstruct a full key pair from a secret key alone.
pub fn keypair_from_secret(secret: SecretKey) -> KeyPair {
    let public = public_from_secret(&secret);
    KeyPair { public, secret }
}

/// Pair an externally supplied secret and public key.
///
/// Used on the decrypt path, where the secret key is recovered from storage
/// and the public key comes from the key record. The two halves are paired
/// as given; a mismatched pair surfaces later as a failed open.
pub fn keypair_from_parts(secret: SecretKey, public: PublicKey) -> KeyPair {
    KeyPair { public, secret }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_nonzero_keys() {
        let kp = generate_keypair();
        assert_ne!(kp.public.0, [0u8; 32]);
        assert_ne!(*kp.secret.as_bytes(), [0u8; 32]);
    }

    #[test]
    fn public_from_secret_is_deterministic() {
        let kp = generate_keypair();
        let rederived = public_from_secret(&kp.secret);
        assert_eq!(kp.public, rederived);
    }

    #[test]
    fn keypair_from_secret_rederives_public() {
        let kp = generate_keypair();
        let secret_bytes = *kp.secret.as_bytes();
        let rebuilt = keypair_from_secret(SecretKey(secret_bytes));
        assert_eq!(kp.public, rebuilt.public);
    }

    #[test]
    fn keypair_from_parts_preserves_both_halves() {
        let kp = generate_keypair();
        let secret_bytes = *kp.secret.as_bytes();
        let rebuilt = keypair_from_parts(SecretKey(secret_bytes), kp.public.clone());
        assert_eq!(rebuilt.public, kp.public);
        assert_eq!(rebuilt.secret.as_bytes(), &secret_bytes);
    }
}
