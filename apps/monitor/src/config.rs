//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
///
/// `refresh_secs` is only the starting interval; once running, a persisted
/// `refresh_rate` setting takes precedence and is re-read every cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Poll interval in seconds when nothing is persisted.
    pub refresh_secs: f64,
    /// Wait after a faulted cycle before polling again, in seconds.
    pub fault_backoff_secs: u64,
    /// HTTP timeout for ticker requests, in seconds.
    pub http_timeout_secs: u64,
    /// Path of the persisted settings file.
    pub settings_path: PathBuf,
    /// Logging level.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_secs: 2.0,
            fault_backoff_secs: 5,
            http_timeout_secs: 30,
            settings_path: PathBuf::from("lira-settings.json"),
            log_level: "info".to_string(),
        }
    }
}
