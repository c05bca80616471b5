//! The verification service — provisioning, submission, review, and gated
//! decryption.

use zeroize::Zeroizing;

use veriseal_crypto::{
    decrypt_symmetric, encrypt_symmetric, generate_keypair, keypair_from_parts, CryptoError,
    ProtectedKey,
};
use veriseal_records::{decode_sealed, encode_sealed, FieldSet};
use veriseal_store::{KeyRecord, KeyStore, RecordStore, StoreError};
use veriseal_types::{KeyPair, SecretKey, Timestamp, UserId, UserKey, VerificationStatus};

use crate::auth::{is_authorized_reviewer, GroupProvider, RequestAuthCache};
use crate::config::ServiceConfig;
use crate::password::PasswordPolicy;
use crate::vault::DocumentVault;
use crate::ServiceError;

/// One uploaded document accompanying a submission.
pub struct UploadedFile {
    /// Original upload name; reduced to its basename on storage.
    pub filename: String,
    pub contents: Vec<u8>,
}

/// Composes the key store, record store, and document vault into the
/// operations exposed to the host platform.
pub struct VerificationService<K, R> {
    keys: K,
    records: R,
    vault: DocumentVault,
    policy: PasswordPolicy,
    authorized_groups: Vec<String>,
}

impl<K: KeyStore, R: RecordStore> VerificationService<K, R> {
    pub fn new(keys: K, records: R, config: &ServiceConfig) -> Self {
        Self {
            keys,
            records,
            vault: DocumentVault::new(&config.upload_dir, config.max_upload_size),
            policy: PasswordPolicy::default(),
            authorized_groups: config.authorized_groups.clone(),
        }
    }

    /// One-time administrative key provisioning.
    ///
    /// Validates the password, creates the password-protected wrapper and a
    /// fresh key pair, unlocks the wrapper immediately to encrypt the secret
    /// key under the recovered user key, and persists the single key record.
    /// Fails with [`ServiceError::KeysExist`] when a record is already
    /// present, leaving it untouched.
    pub fn provision_keys(&self, password: &str, now: Timestamp) -> Result<(), ServiceError> {
        let report = self.policy.validate(password)?;
        for advisory in &report.advisories {
            tracing::warn!(rule = %advisory, "password advisory");
        }

        let protected = ProtectedKey::generate(password)?;
        let keypair = generate_keypair();
        let user_key = protected.unlock(password)?;
        let encrypted_private_key = encrypt_symmetric(keypair.secret.as_bytes(), &user_key)?;

        let record = KeyRecord {
            public_key: keypair.public,
            protected_key: protected.to_ascii_safe(),
            encrypted_private_key,
            enabled: true,
            created_at: now,
            updated_at: now,
        };
        self.keys.insert_key(&record).map_err(|e| match e {
            StoreError::Duplicate(_) => ServiceError::KeysExist,
            other => other.into(),
        })?;

        tracing::info!("verification keys created");
        Ok(())
    }

    /// Unlock the stored protected key with the administrator password,
    /// yielding the session user key.
    ///
    /// A wrong password and a corrupted blob fail identically; the failure
    /// is permanent for a given input, so callers re-prompt rather than
    /// retry.
    pub fn unlock_user_key(&self, password: &str) -> Result<UserKey, ServiceError> {
        let record = self.active_key()?;
        let protected = ProtectedKey::from_ascii_safe(&record.protected_key)?;
        Ok(protected.unlock(password)?)
    }

    /// Store a user's submission: documents first, then the sealed
    /// field-set row (insert, or atomic update resetting status to pending).
    pub fn submit(
        &self,
        user: &UserId,
        fields: &FieldSet,
        files: &[UploadedFile],
        now: Timestamp,
    ) -> Result<(), ServiceError> {
        let record = self.active_key()?;

        for file in files {
            self.vault
                .store(user, &file.filename, &file.contents, &record.public_key)?;
        }

        let blob = encode_sealed(fields, &record.public_key)?;
        self.records.upsert_submission(user, &blob, now)?;

        tracing::info!(user = %user, files = files.len(), "verification submission stored");
        Ok(())
    }

    /// Decrypt a user's sealed field-set for an authorized reviewer.
    ///
    /// The gate is "a reviewer who has unlocked the user key", independent
    /// of record status. Absent record or empty data is `Ok(None)`.
    pub fn decrypt_record(
        &self,
        actor: &UserId,
        provider: &dyn GroupProvider,
        cache: &mut RequestAuthCache,
        subject: &UserId,
        user_key: Option<&UserKey>,
    ) -> Result<Option<FieldSet>, ServiceError> {
        self.require_reviewer(actor, provider, cache)?;

        let Some(row) = self.records.get_record(subject)? else {
            return Ok(None);
        };
        if row.data.is_empty() {
            return Ok(None);
        }

        let keypair = self.reviewer_keypair(user_key)?;
        Ok(decode_sealed(&row.data, &keypair)?)
    }

    /// Decrypt one of a user's stored documents for an authorized reviewer.
    pub fn open_document(
        &self,
        actor: &UserId,
        provider: &dyn GroupProvider,
        cache: &mut RequestAuthCache,
        subject: &UserId,
        filename: &str,
        user_key: Option<&UserKey>,
    ) -> Result<Option<Vec<u8>>, ServiceError> {
        self.require_reviewer(actor, provider, cache)?;
        let keypair = self.reviewer_keypair(user_key)?;
        self.vault.load(subject, filename, &keypair)
    }

    /// Record a review outcome. Status and comments change; the sealed data
    /// is untouched.
    pub fn review(
        &self,
        actor: &UserId,
        provider: &dyn GroupProvider,
        cache: &mut RequestAuthCache,
        subject: &UserId,
        status: VerificationStatus,
        comments: &str,
        now: Timestamp,
    ) -> Result<(), ServiceError> {
        self.require_reviewer(actor, provider, cache)?;
        self.records.set_review(subject, status, comments, now)?;
        tracing::info!(user = %subject, status = %status, "verification reviewed");
        Ok(())
    }

    /// The user's verification status; `None` (the synthetic value) when no
    /// record exists.
    pub fn status(&self, user: &UserId) -> Result<VerificationStatus, ServiceError> {
        Ok(self.records.status(user)?)
    }

    /// Whether the user passes the verification gate.
    pub fn is_verified(&self, user: &UserId) -> Result<bool, ServiceError> {
        Ok(self.status(user)?.is_verified())
    }

    fn active_key(&self) -> Result<KeyRecord, ServiceError> {
        self.keys.active_key()?.ok_or(ServiceError::NotConfigured)
    }

    fn require_reviewer(
        &self,
        actor: &UserId,
        provider: &dyn GroupProvider,
        cache: &mut RequestAuthCache,
    ) -> Result<(), ServiceError> {
        if is_authorized_reviewer(cache, provider, actor, &self.authorized_groups) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied)
        }
    }

    /// Rebuild the key pair for the decrypt path: recover the secret key
    /// from its symmetric wrapping under the session user key, then pair it
    /// with the stored public key.
    fn reviewer_keypair(&self, user_key: Option<&UserKey>) -> Result<KeyPair, ServiceError> {
        let record = self.active_key()?;
        let user_key = user_key.ok_or(ServiceError::CannotDecrypt)?;

        let secret_bytes = Zeroizing::new(decrypt_symmetric(
            &record.encrypted_private_key,
            user_key,
        )?);
        let secret: [u8; 32] = secret_bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::WrongKeyOrCorrupted)?;

        Ok(keypair_from_parts(SecretKey(secret), record.public_key))
    }
}
