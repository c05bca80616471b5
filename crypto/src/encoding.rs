//! ASCII-safe encodings for key material.
//!
//! Every blob is the hex encoding of `magic(2) || version(1) || payload`,
//! portable across cookies and database text columns.

use veriseal_types::UserKey;

use crate::error::CryptoError;

pub(crate) const ENCODING_VERSION: u8 = 1;
const USER_KEY_MAGIC: [u8; 2] = *b"VK";
pub(crate) const PROTECTED_KEY_MAGIC: [u8; 2] = *b"VP";

pub(crate) fn encode_blob(magic: [u8; 2], payload: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(3 + payload.len());
    bytes.extend_from_slice(&magic);
    bytes.push(ENCODING_VERSION);
    bytes.extend_from_slice(payload);
    hex::encode(bytes)
}

/// Decode a blob, checking magic and version.
///
/// Any malformation is reported as `WrongKeyOrCorrupted`: corrupted key
/// material must not be distinguishable from a wrong key.
pub(crate) fn decode_blob(magic: [u8; 2], encoded: &str) -> Result<Vec<u8>, CryptoError> {
    let bytes = hex::decode(encoded).map_err(|_| CryptoError::WrongKeyOrCorrupted)?;
    if bytes.len() < 3 || bytes[..2] != magic || bytes[2] != ENCODING_VERSION {
        return Err(CryptoError::WrongKeyOrCorrupted);
    }
    Ok(bytes[3..].to_vec())
}

/// Encode the unlocked user key for cookie storage.
pub fn encode_user_key(key: &UserKey) -> String {
    encode_blob(USER_KEY_MAGIC, key.as_bytes())
}

/// Decode a user key from its cookie form.
pub fn decode_user_key(encoded: &str) -> Result<UserKey, CryptoError> {
    let payload = decode_blob(USER_KEY_MAGIC, encoded)?;
    let bytes: [u8; 32] = payload
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::WrongKeyOrCorrupted)?;
    Ok(UserKey::from_bytes(bytes))
}
