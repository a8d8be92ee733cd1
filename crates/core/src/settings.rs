//! Persisted settings keys and the provider trait.

use crate::{AlertSettings, Exchange, DEFAULT_ALERT_THRESHOLD, DEFAULT_SOUND_LEVEL, MAX_SOUND_LEVEL};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Key for the shared threshold applied by bulk threshold updates.
pub const GLOBAL_THRESHOLD_KEY: &str = "global_threshold";
/// Key for the poll interval in seconds.
pub const REFRESH_RATE_KEY: &str = "refresh_rate";
/// Poll interval used when no valid `refresh_rate` is persisted.
pub const DEFAULT_REFRESH_SECS: f64 = 2.0;

/// Convert a refresh value in seconds to a poll delay.
///
/// Returns `None` for values no timer can honor: zero, negatives, NaN,
/// infinities and magnitudes beyond what a [`Duration`] holds.
pub fn refresh_duration(secs: f64) -> Option<Duration> {
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

/// Threshold key for a coin on a local exchange.
///
/// BtcTurk settings carry a `_btc` suffix; Paribu uses the bare key.
/// The same split applies to the sound level and alert-active keys.
pub fn threshold_key(symbol: &str, exchange: Exchange) -> String {
    match exchange {
        Exchange::Btcturk => format!("{}_threshold_btc", symbol),
        _ => format!("{}_threshold", symbol),
    }
}

/// Sound level key for a coin on a local exchange.
pub fn sound_level_key(symbol: &str, exchange: Exchange) -> String {
    match exchange {
        Exchange::Btcturk => format!("{}_sound_level_btc", symbol),
        _ => format!("{}_sound_level", symbol),
    }
}

/// Alert-active key for a coin on a local exchange.
pub fn alert_active_key(symbol: &str, exchange: Exchange) -> String {
    match exchange {
        Exchange::Btcturk => format!("{}_alert_active_btc", symbol),
        _ => format!("{}_alert_active", symbol),
    }
}

/// Typed access to a key-value settings store.
///
/// Every read takes a default so a missing or mistyped key never fails;
/// writes are best effort.
pub trait SettingsProvider: Send + Sync {
    fn get_f64(&self, key: &str, default: f64) -> f64;
    fn get_i64(&self, key: &str, default: i64) -> i64;
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn put_f64(&self, key: &str, value: f64);
    fn put_i64(&self, key: &str, value: i64);
    fn put_bool(&self, key: &str, value: bool);
}

/// Load the persisted alert settings for a coin on a local exchange,
/// falling back to defaults for anything missing.
pub fn load_alert_settings(
    provider: &dyn SettingsProvider,
    symbol: &str,
    exchange: Exchange,
) -> AlertSettings {
    let threshold = provider.get_f64(&threshold_key(symbol, exchange), DEFAULT_ALERT_THRESHOLD);
    let sound_level = provider
        .get_i64(&sound_level_key(symbol, exchange), DEFAULT_SOUND_LEVEL as i64)
        .clamp(0, MAX_SOUND_LEVEL as i64) as u8;
    let active = provider.get_bool(&alert_active_key(symbol, exchange), true);
    AlertSettings {
        threshold,
        sound_level,
        active,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SettingValue {
    F64(f64),
    I64(i64),
    Bool(bool),
}

/// In-memory settings store with no persistence.
///
/// Used by tests and as a fallback when no settings file is wanted.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, SettingValue>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, SettingValue>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SettingValue>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SettingsProvider for MemorySettings {
    fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.read().get(key) {
            Some(SettingValue::F64(v)) => *v,
            _ => default,
        }
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        match self.read().get(key) {
            Some(SettingValue::I64(v)) => *v,
            _ => default,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.read().get(key) {
            Some(SettingValue::Bool(v)) => *v,
            _ => default,
        }
    }

    fn put_f64(&self, key: &str, value: f64) {
        self.write().insert(key.to_string(), SettingValue::F64(value));
    }

    fn put_i64(&self, key: &str, value: i64) {
        self.write().insert(key.to_string(), SettingValue::I64(value));
    }

    fn put_bool(&self, key: &str, value: bool) {
        self.write().insert(key.to_string(), SettingValue::Bool(value));
    }
}
