//! Service configuration with TOML file support.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use veriseal_session::CookiePolicy;

use crate::ServiceError;

/// Configuration for the verification service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Passed explicitly to
/// constructors; there is no ambient configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Root directory for per-user encrypted uploads.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Maximum accepted size for one uploaded document, in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,

    /// Session-cookie lifetime, bound to the host's remember-me duration.
    #[serde(default = "default_remember_duration")]
    pub remember_duration_secs: u64,

    /// Cookie attributes mirroring the host's session-cookie policy.
    #[serde(default)]
    pub cookie: CookiePolicy,

    /// Groups whose members may review and decrypt submissions.
    #[serde(default = "default_authorized_groups")]
    pub authorized_groups: Vec<String>,

    /// Data directory for the LMDB store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ServiceConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ServiceError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ServiceError::Config(e.to_string()))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_size: default_max_upload_size(),
            remember_duration_secs: default_remember_duration(),
            cookie: CookiePolicy::default(),
            authorized_groups: default_authorized_groups(),
            data_dir: default_data_dir(),
            map_size: default_map_size(),
            log_level: default_log_level(),
        }
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./veriseal_uploads")
}

fn default_max_upload_size() -> u64 {
    100 * 1024 * 1024
}

/// Thirty days, the usual remember-me horizon.
fn default_remember_duration() -> u64 {
    30 * 24 * 60 * 60
}

fn default_authorized_groups() -> Vec<String> {
    vec![
        "sysop".to_string(),
        "bureaucrat".to_string(),
        "interface-admin".to_string(),
        "verification-admin".to_string(),
    ]
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./veriseal_data")
}

fn default_map_size() -> usize {
    256 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}
