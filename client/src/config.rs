//! Client configuration with TOML file support.

use crate::ClientError;
use ecotrace_types::VerificationParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for an ecotrace client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// District assigned to profiles created at first sign-in when the
    /// sign-up flow did not collect one.
    #[serde(default = "default_district")]
    pub default_district: String,

    /// Verification protocol constants. The 3/2 defaults are normative.
    #[serde(default)]
    pub verification: VerificationParams,

    /// Entries shown on the district leaderboard.
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Own actions shown on the dashboard.
    #[serde(default = "default_recent_actions")]
    pub recent_actions: usize,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_district() -> String {
    "unassigned".to_string()
}

fn default_leaderboard_size() -> usize {
    5
}

fn default_recent_actions() -> usize {
    10
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_district: default_district(),
            verification: VerificationParams::default(),
            leaderboard_size: default_leaderboard_size(),
            recent_actions: default_recent_actions(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ClientError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Internal(format!("read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| ClientError::Internal(format!("parse {}: {e}", path.display())))
    }
}
