//! Signed, scoped cookie for the unlocked user key.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use veriseal_crypto::{decode_user_key, encode_user_key};
use veriseal_types::{Timestamp, UserKey};

use crate::error::SessionError;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie carrying the user key.
pub const USER_KEY_COOKIE: &str = "veriseal-userkey";

/// SameSite attribute values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// Cookie attributes mirroring the host platform's session-cookie policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookiePolicy {
    #[serde(default = "default_path")]
    pub path: String,
    /// Empty means host-only.
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_true")]
    pub secure: bool,
    #[serde(default = "default_true")]
    pub http_only: bool,
    #[serde(default = "default_same_site")]
    pub same_site: SameSite,
}

fn default_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_same_site() -> SameSite {
    SameSite::Lax
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            path: default_path(),
            domain: String::new(),
            secure: true,
            http_only: true,
            same_site: default_same_site(),
        }
    }
}

/// A cookie ready to hand to the host platform's response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    /// Seconds until expiry; zero deletes the cookie.
    pub max_age_secs: u64,
    /// Absolute expiry, for hosts that prefer `Expires`.
    pub expires_at: Timestamp,
    pub policy: CookiePolicy,
}

impl SessionCookie {
    /// Render as a `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        let mut header = format!(
            "{}={}; Max-Age={}; Path={}",
            self.name, self.value, self.max_age_secs, self.policy.path
        );
        if !self.policy.domain.is_empty() {
            header.push_str("; Domain=");
            header.push_str(&self.policy.domain);
        }
        header.push_str("; SameSite=");
        header.push_str(self.policy.same_site.as_str());
        if self.policy.secure {
            header.push_str("; Secure");
        }
        if self.policy.http_only {
            header.push_str("; HttpOnly");
        }
        header
    }
}

/// Issues and reads the signed user-key cookie.
///
/// The cookie value is `<ascii-safe key>.<hex HMAC-SHA256 tag>`, keyed by a
/// server-side signing secret and bound to the cookie name. Expiry follows
/// the host's remember-me duration; the browser enforces it via `Max-Age`.
pub struct SessionKeyCarrier {
    signing_key: Vec<u8>,
    policy: CookiePolicy,
    remember_duration_secs: u64,
}

impl SessionKeyCarrier {
    pub fn new(signing_key: Vec<u8>, policy: CookiePolicy, remember_duration_secs: u64) -> Self {
        Self {
            signing_key,
            policy,
            remember_duration_secs,
        }
    }

    fn mac_for(&self, encoded_key: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.signing_key).expect("HMAC accepts any key length");
        mac.update(USER_KEY_COOKIE.as_bytes());
        mac.update(b":");
        mac.update(encoded_key.as_bytes());
        mac
    }

    /// Produce the cookie carrying `key`, valid for the remember duration.
    pub fn issue(&self, key: &UserKey, now: Timestamp) -> SessionCookie {
        let encoded = encode_user_key(key);
        let tag = self.mac_for(&encoded).finalize().into_bytes();
        SessionCookie {
            name: USER_KEY_COOKIE.to_string(),
            value: format!("{}.{}", encoded, hex::encode(tag)),
            max_age_secs: self.remember_duration_secs,
            expires_at: now.plus_secs(self.remember_duration_secs),
            policy: self.policy.clone(),
        }
    }

    /// Recover the user key from a cookie value, verifying the signature.
    pub fn extract(&self, raw_value: &str) -> Result<UserKey, SessionError> {
        let (encoded, tag_hex) = raw_value
            .split_once('.')
            .ok_or(SessionError::InvalidCookie)?;
        let tag = hex::decode(tag_hex).map_err(|_| SessionError::InvalidCookie)?;

        self.mac_for(encoded)
            .verify_slice(&tag)
            .map_err(|_| SessionError::InvalidCookie)?;

        decode_user_key(encoded).map_err(|_| SessionError::InvalidCookie)
    }

    /// The deletion cookie sent on logout.
    pub fn removal(&self, now: Timestamp) -> SessionCookie {
        SessionCookie {
            name: USER_KEY_COOKIE.to_string(),
            value: String::new(),
            max_age_secs: 0,
            expires_at: now,
            policy: self.policy.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier() -> SessionKeyCarrier {
        SessionKeyCarrier::new(b"server signing secret".to_vec(), CookiePolicy::default(), 3600)
    }

    fn test_key() -> UserKey {
        UserKey::from_bytes([42u8; 32])
    }

    #[test]
    fn issue_extract_roundtrip() {
        let carrier = carrier();
        let cookie = carrier.issue(&test_key(), Timestamp::new(1000));

        assert_eq!(cookie.name, USER_KEY_COOKIE);
        assert_eq!(cookie.expires_at, Timestamp::new(4600));
        assert_eq!(carrier.extract(&cookie.value).unwrap(), test_key());
    }

    #[test]
    fn tampered_value_rejected() {
        let carrier = carrier();
        let cookie = carrier.issue(&test_key(), Timestamp::new(1000));

        let mut chars: Vec<char> = cookie.value.chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        let tampered: String = chars.into_iter().collect();

        assert_eq!(carrier.extract(&tampered), Err(SessionError::InvalidCookie));
    }

    #[test]
    fn foreign_signing_secret_rejected() {
        let cookie = carrier().issue(&test_key(), Timestamp::new(1000));
        let other =
            SessionKeyCarrier::new(b"different secret".to_vec(), CookiePolicy::default(), 3600);
        assert_eq!(other.extract(&cookie.value), Err(SessionError::InvalidCookie));
    }

    #[test]
    fn malformed_values_rejected() {
        let carrier = carrier();
        assert_eq!(carrier.extract(""), Err(SessionError::InvalidCookie));
        assert_eq!(carrier.extract("no-dot-here"), Err(SessionError::InvalidCookie));
        assert_eq!(carrier.extract("abc.nothex!"), Err(SessionError::InvalidCookie));
    }

    #[test]
    fn removal_cookie_clears_value() {
        let carrier = carrier();
        let removal = carrier.removal(Timestamp::new(1000));
        assert!(removal.value.is_empty());
        assert_eq!(removal.max_age_secs, 0);
    }

    #[test]
    fn header_value_carries_policy_attributes() {
        let carrier = SessionKeyCarrier::new(
            b"secret".to_vec(),
            CookiePolicy {
                path: "/wiki".into(),
                domain: "wiki.example.org".into(),
                secure: true,
                http_only: true,
                same_site: SameSite::Strict,
            },
            60,
        );
        let header = carrier.issue(&test_key(), Timestamp::new(0)).header_value();

        assert!(header.starts_with("veriseal-userkey="));
        assert!(header.contains("Max-Age=60"));
        assert!(header.contains("Path=/wiki"));
        assert!(header.contains("Domain=wiki.example.org"));
        assert!(header.contains("SameSite=Strict"));
        assert!(header.contains("Secure"));
        assert!(header.contains("HttpOnly"));
    }
}
