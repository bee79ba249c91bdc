// src/config.rs

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;

use crate::errors::ServerError;

pub const DEFAULT_CONFIG_PATH: &str = "server_config.json";

/// Runtime configuration, loaded from `server_config.json` at boot and saved
/// back whenever the scheduler state changes. Every field has a default so a
/// missing or partial file still boots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Storage backend: "sqlite" or "json".
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,
    #[serde(default = "default_json_path")]
    pub json_path: String,
    /// Naver complex id (hscpNo) collected by default.
    #[serde(default = "default_complex_no")]
    pub complex_no: String,
    /// Trade type code: A1 sale, B1 jeonse, B2 monthly rent.
    #[serde(default = "default_trade_type")]
    pub trade_type: String,
    #[serde(default = "default_interval_min")]
    pub interval_min: u64,
    /// Diff magnitude above which an event is treated as a scrape glitch.
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: usize,
    /// Trailing window length for the realtor leaderboards.
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
    /// SHA-256 hex digest of the shared admin key.
    #[serde(default = "default_admin_key_digest")]
    pub admin_key_digest: String,
    /// Resume the collection scheduler on boot.
    #[serde(default)]
    pub auto_collect: bool,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_backend() -> String {
    "sqlite".to_string()
}
fn default_sqlite_path() -> String {
    "land_watch.sqlite3".to_string()
}
fn default_json_path() -> String {
    "data.json".to_string()
}
fn default_complex_no() -> String {
    // Mapo Raemian Purgio, the complex the tool was originally pointed at.
    "108064".to_string()
}
fn default_trade_type() -> String {
    "A1".to_string()
}
fn default_interval_min() -> u64 {
    30
}
fn default_anomaly_threshold() -> usize {
    30
}
fn default_window_days() -> i64 {
    7
}
fn default_leaderboard_size() -> usize {
    10
}
fn default_admin_key_digest() -> String {
    digest_key("Aqwe123!@#")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            backend: default_backend(),
            sqlite_path: default_sqlite_path(),
            json_path: default_json_path(),
            complex_no: default_complex_no(),
            trade_type: default_trade_type(),
            interval_min: default_interval_min(),
            anomaly_threshold: default_anomaly_threshold(),
            window_days: default_window_days(),
            leaderboard_size: default_leaderboard_size(),
            admin_key_digest: default_admin_key_digest(),
            auto_collect: false,
        }
    }
}

impl AppConfig {
    /// Compare a presented admin key against the stored digest.
    pub fn key_matches(&self, presented: &str) -> bool {
        digests_equal(&digest_key(presented), &self.admin_key_digest)
    }
}

/// SHA-256 hex digest of a shared key. Only the digest is ever stored.
pub fn digest_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let out = hasher.finalize();
    out.iter().map(|b| format!("{b:02x}")).collect()
}

/// Constant-time-ish compare (simple and sufficient here).
fn digests_equal(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Config file path, overridable for tests and side-by-side deployments.
pub fn config_path() -> String {
    std::env::var("LAND_WATCH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Load the config, falling back to defaults when the file is missing or
/// unreadable. A corrupt config should never keep the server from booting.
pub fn load_config(path: &str) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("⚠️ Config {path} unreadable ({e}), using defaults");
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> Result<(), ServerError> {
    let raw = serde_json::to_string_pretty(config).map_err(|_| ServerError::InternalError)?;
    fs::write(path, raw).map_err(|e| ServerError::DbError(format!("Write {path} failed: {e}")))
}
