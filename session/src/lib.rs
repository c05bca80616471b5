//! Session-cookie carrier for the unlocked user key.
//!
//! The user key recovered by the password-unlock protocol is never stored
//! server-side; it rides in one signed, scoped cookie for the lifetime of
//! the administrator's session and is deleted on logout.

pub mod cookie;
pub mod error;

pub use cookie::{CookiePolicy, SameSite, SessionCookie, SessionKeyCarrier, USER_KEY_COOKIE};
pub use error::SessionError;
