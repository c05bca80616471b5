//! The veriseal verification service.
//!
//! Composes the key store, record store, document vault, codec, and session
//! carrier into the administrator-facing operations: key provisioning,
//! password unlock, submission, review, and gated decryption. All
//! collaborators are injected explicitly; configuration is an explicit
//! struct, never ambient state.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod password;
pub mod service;
pub mod vault;

pub use auth::{is_authorized_reviewer, GroupProvider, RequestAuthCache};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use logging::init_tracing;
pub use password::{PasswordPolicy, RuleViolation, ValidationError, ValidationReport};
pub use service::{UploadedFile, VerificationService};
pub use vault::DocumentVault;
