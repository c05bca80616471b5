//! Fundamental types for the veriseal identity-verification service.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: user identifiers, timestamps, verification status, and the key
//! material newtypes used by the envelope-encryption scheme.

pub mod keys;
pub mod status;
pub mod time;
pub mod user;

pub use keys::{KeyPair, PublicKey, SecretKey, UserKey};
pub use status::VerificationStatus;
pub use time::Timestamp;
pub use user::UserId;
