//! Encrypted document storage, one directory per user.
//!
//! Uploaded file contents are sealed under the system public key before they
//! touch disk; filenames are preserved from the original upload, reduced to
//! their basename. Resubmission overwrites by filename.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use veriseal_crypto::{open, seal};
use veriseal_types::{KeyPair, PublicKey, UserId};

use crate::ServiceError;

pub struct DocumentVault {
    root: PathBuf,
    max_size: u64,
}

impl DocumentVault {
    pub fn new(root: impl Into<PathBuf>, max_size: u64) -> Self {
        Self {
            root: root.into(),
            max_size,
        }
    }

    /// The user's private upload directory.
    pub fn user_dir(&self, user: &UserId) -> PathBuf {
        self.root.join(user.to_string())
    }

    /// Seal `contents` and write them under the user's directory, creating
    /// it on demand. Returns the path written.
    pub fn store(
        &self,
        user: &UserId,
        filename: &str,
        contents: &[u8],
        public: &PublicKey,
    ) -> Result<PathBuf, ServiceError> {
        if contents.len() as u64 > self.max_size {
            return Err(ServiceError::FileTooLarge {
                name: filename.to_string(),
                size: contents.len() as u64,
                max: self.max_size,
            });
        }
        let name = sanitize_filename(filename)?;

        let dir = self.user_dir(user);
        fs::create_dir_all(&dir)?;

        let sealed = seal(contents, public)?;
        let path = dir.join(name);
        fs::write(&path, sealed)?;
        Ok(path)
    }

    /// Read and open a stored document. A missing file is "no data", not an
    /// error; a present but unopenable file is.
    pub fn load(
        &self,
        user: &UserId,
        filename: &str,
        keypair: &KeyPair,
    ) -> Result<Option<Vec<u8>>, ServiceError> {
        let name = sanitize_filename(filename)?;
        let path = self.user_dir(user).join(name);

        let sealed = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(open(&sealed, keypair)?))
    }
}

/// Reduce an upload name to a plain basename, rejecting anything that could
/// escape the user's directory.
fn sanitize_filename(filename: &str) -> Result<String, ServiceError> {
    // `file_name` is None for "..", trailing "/", and the empty string.
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ServiceError::InvalidFilename(filename.to_string()))?;
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriseal_crypto::generate_keypair;

    fn vault() -> (tempfile::TempDir, DocumentVault) {
        let dir = tempfile::tempdir().unwrap();
        let vault = DocumentVault::new(dir.path(), 1024);
        (dir, vault)
    }

    #[test]
    fn store_load_roundtrip() {
        let (_dir, vault) = vault();
        let kp = generate_keypair();
        let user = UserId::new(42);

        let path = vault
            .store(&user, "passport.pdf", b"scan bytes", &kp.public)
            .unwrap();
        assert!(path.ends_with("42/passport.pdf"));

        // On-disk bytes are ciphertext.
        let raw = std::fs::read(&path).unwrap();
        assert_ne!(raw, b"scan bytes");

        let loaded = vault.load(&user, "passport.pdf", &kp).unwrap().unwrap();
        assert_eq!(loaded, b"scan bytes");
    }

    #[test]
    fn missing_file_is_none() {
        let (_dir, vault) = vault();
        let kp = generate_keypair();
        assert!(vault
            .load(&UserId::new(1), "nothing.pdf", &kp)
            .unwrap()
            .is_none());
    }

    #[test]
    fn oversized_upload_rejected() {
        let (_dir, vault) = vault();
        let kp = generate_keypair();
        let big = vec![0u8; 2048];

        match vault.store(&UserId::new(1), "big.bin", &big, &kp.public) {
            Err(ServiceError::FileTooLarge { size, max, .. }) => {
                assert_eq!(size, 2048);
                assert_eq!(max, 1024);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn path_components_are_stripped() {
        let (_dir, vault) = vault();
        let kp = generate_keypair();
        let user = UserId::new(7);

        let path = vault
            .store(&user, "../../etc/passwd", b"data", &kp.public)
            .unwrap();
        assert!(path.ends_with("7/passwd"));
        assert!(vault.load(&user, "passwd", &kp).unwrap().is_some());
    }

    #[test]
    fn bare_traversal_name_rejected() {
        let (_dir, vault) = vault();
        let kp = generate_keypair();
        assert!(matches!(
            vault.store(&UserId::new(7), "..", b"data", &kp.public),
            Err(ServiceError::InvalidFilename(_))
        ));
    }

    #[test]
    fn overwrite_by_filename() {
        let (_dir, vault) = vault();
        let kp = generate_keypair();
        let user = UserId::new(7);

        vault.store(&user, "id.png", b"first", &kp.public).unwrap();
        vault.store(&user, "id.png", b"second", &kp.public).unwrap();

        let loaded = vault.load(&user, "id.png", &kp).unwrap().unwrap();
        assert_eq!(loaded, b"second");
    }
}
