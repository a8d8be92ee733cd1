//! Per-coin market snapshots and alert settings.

use crate::Exchange;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Default alert threshold in percent.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 2.5;
/// Default alert sound level.
pub const DEFAULT_SOUND_LEVEL: u8 = 15;
/// Highest accepted alert sound level.
pub const MAX_SOUND_LEVEL: u8 = 15;

/// Alert configuration for one coin on one local exchange.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertSettings {
    /// Threshold in percent a difference must exceed to alert.
    pub threshold: f64,
    /// Alert sound level (0 to [`MAX_SOUND_LEVEL`]).
    pub sound_level: u8,
    /// Whether alerts fire for this coin at all.
    pub active: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ALERT_THRESHOLD,
            sound_level: DEFAULT_SOUND_LEVEL,
            active: true,
        }
    }
}

/// Computed market state for one coin after a polling cycle.
///
/// Prices are in TRY except `binance_price_usd`. A price of 0.0 means the
/// exchange did not quote the coin that cycle (or the bridge rate needed
/// to convert it was still unknown).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSnapshot {
    /// Ticker symbol (e.g., "BTC").
    pub symbol: CompactString,
    /// Display name (e.g., "Bitcoin").
    pub name: CompactString,
    /// Best bid on Paribu, in TRY.
    pub paribu_price: f64,
    /// Best bid on BtcTurk, in TRY.
    pub btcturk_price: f64,
    /// Binance best ask converted with the Paribu bridge rate, in TRY.
    pub binance_price_paribu: f64,
    /// Binance best ask converted with the BtcTurk bridge rate, in TRY.
    pub binance_price_btcturk: f64,
    /// Binance best ask as quoted, in USDT.
    pub binance_price_usd: f64,
    /// Paribu vs converted Binance difference, in percent.
    pub paribu_difference: f64,
    /// BtcTurk vs converted Binance difference, in percent.
    pub btcturk_difference: f64,
    /// Alert settings for the Paribu comparison.
    pub paribu_alert: AlertSettings,
    /// Alert settings for the BtcTurk comparison.
    pub btcturk_alert: AlertSettings,
}

impl CoinSnapshot {
    /// Zeroed snapshot with default alert settings.
    pub fn new(symbol: &str, name: &str) -> Self {
        Self {
            symbol: CompactString::new(symbol),
            name: CompactString::new(name),
            paribu_price: 0.0,
            btcturk_price: 0.0,
            binance_price_paribu: 0.0,
            binance_price_btcturk: 0.0,
            binance_price_usd: 0.0,
            paribu_difference: 0.0,
            btcturk_difference: 0.0,
            paribu_alert: AlertSettings::default(),
            btcturk_alert: AlertSettings::default(),
        }
    }

    /// Percentage difference against the given local exchange.
    /// The reference market carries no difference of its own.
    pub fn difference(&self, exchange: Exchange) -> f64 {
        match exchange {
            Exchange::Paribu => self.paribu_difference,
            Exchange::Btcturk => self.btcturk_difference,
            Exchange::Binance => 0.0,
        }
    }

    /// Alert settings for a local exchange, `None` for the reference.
    pub fn alert(&self, exchange: Exchange) -> Option<&AlertSettings> {
        match exchange {
            Exchange::Paribu => Some(&self.paribu_alert),
            Exchange::Btcturk => Some(&self.btcturk_alert),
            Exchange::Binance => None,
        }
    }

    /// Mutable alert settings for a local exchange, `None` for the reference.
    pub fn alert_mut(&mut self, exchange: Exchange) -> Option<&mut AlertSettings> {
        match exchange {
            Exchange::Paribu => Some(&mut self.paribu_alert),
            Exchange::Btcturk => Some(&mut self.btcturk_alert),
            Exchange::Binance => None,
        }
    }
}
