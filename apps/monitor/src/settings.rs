//! JSON-file backed settings store.

use dashmap::DashMap;
use lira_core::SettingsProvider;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Settings persisted as one JSON object on disk.
///
/// The file is read once at open and rewritten after every put. A missing
/// file is a fresh start; an unreadable or malformed one is logged and
/// treated as empty rather than blocking startup.
pub struct JsonSettingsStore {
    path: PathBuf,
    values: DashMap<String, Value>,
}

impl JsonSettingsStore {
    /// Open the store at `path`, loading any existing values.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = DashMap::new();

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, Value>>(&contents) {
                Ok(stored) => {
                    for (key, value) in stored {
                        values.insert(key, value);
                    }
                }
                Err(e) => warn!(
                    "settings file {} is malformed, starting empty: {}",
                    path.display(),
                    e
                ),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings file at {}, starting empty", path.display());
            }
            Err(e) => warn!("could not read settings file {}: {}", path.display(), e),
        }

        Self { path, values }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rewrite the settings file from the current values. The new contents
    /// are staged to a sibling file and renamed into place, so the file on
    /// disk is always a complete JSON object even if a write is interrupted.
    /// A write failure is logged and the in-memory value stands.
    fn save(&self) {
        let snapshot: BTreeMap<String, Value> = self
            .values
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let contents = match serde_json::to_string_pretty(&snapshot) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("could not serialize settings: {}", e);
                return;
            }
        };

        let staging = self.staging_path();
        if let Err(e) =
            fs::write(&staging, contents).and_then(|_| fs::rename(&staging, &self.path))
        {
            warn!(
                "could not write settings file {}: {}",
                self.path.display(),
                e
            );
        }
    }

    /// Staging file next to the target, so the rename stays on one filesystem.
    fn staging_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".tmp");
        PathBuf::from(path)
    }

    fn put(&self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
        self.save();
    }
}

impl SettingsProvider for JsonSettingsStore {
    fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.values
            .get(key)
            .and_then(|v| v.as_f64())
            .unwrap_or(default)
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.values
            .get(key)
            .and_then(|v| v.as_i64())
            .unwrap_or(default)
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    fn put_f64(&self, key: &str, value: f64) {
        // Non-finite floats serialize as null and read back as the default.
        self.put(key, Value::from(value));
    }

    fn put_i64(&self, key: &str, value: i64) {
        self.put(key, Value::from(value));
    }

    fn put_bool(&self, key: &str, value: bool) {
        self.put(key, Value::from(value));
    }
}
