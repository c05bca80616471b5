//! Verification field-set codec.
//!
//! A submission is an ordered mapping from field name to a (kind, value)
//! pair. `Text` values carry the submitted text; `File` values carry a
//! filename relative to the user's private upload directory, never the file
//! content. The codec serializes the mapping to JSON and passes it through
//! sealed-box encryption; decoding is the inverse.

pub mod codec;
pub mod error;
pub mod fields;

pub use codec::{decode_sealed, encode_sealed};
pub use error::RecordError;
pub use fields::{FieldKind, FieldSet, FieldValue};
