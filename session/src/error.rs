use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Tampered signature, malformed value, or undecodable key material.
    /// One variant on purpose: the causes must not be distinguishable.
    #[error("invalid session cookie")]
    InvalidCookie,
}
