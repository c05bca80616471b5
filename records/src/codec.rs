//! Sealed encoding and decoding of field-sets.

use veriseal_crypto::{open, seal};
use veriseal_types::{KeyPair, PublicKey};

use crate::error::RecordError;
use crate::fields::FieldSet;

/// Serialize the field-set to JSON and seal it under the system public key.
pub fn encode_sealed(fields: &FieldSet, public: &PublicKey) -> Result<Vec<u8>, RecordError> {
    let json = serde_json::to_vec(fields)?;
    Ok(seal(&json, public)?)
}

/// Open a sealed field-set blob and parse it.
///
/// An empty blob means "no data" and decodes to `None`. A present but
/// unopenable blob is an error.
pub fn decode_sealed(blob: &[u8], keypair: &KeyPair) -> Result<Option<FieldSet>, RecordError> {
    if blob.is_empty() {
        return Ok(None);
    }
    let plaintext = open(blob, keypair)?;
    let fields = serde_json::from_slice(&plaintext)?;
    Ok(Some(fields))
}
