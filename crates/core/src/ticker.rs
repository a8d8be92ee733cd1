//! Raw ticker rows as returned by exchange REST endpoints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One ticker row from an exchange.
///
/// Fields the endpoint omitted, returned as null, or that failed to parse
/// stay `None`; downstream math decides what a missing quote means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTicker {
    /// Best bid price.
    pub bid: Option<f64>,
    /// Best ask price.
    pub ask: Option<f64>,
    /// Last trade price.
    pub last: Option<f64>,
}

impl RawTicker {
    pub fn new(bid: Option<f64>, ask: Option<f64>, last: Option<f64>) -> Self {
        Self { bid, ask, last }
    }
}

/// Tickers for one exchange, keyed by that exchange's pair symbol.
pub type TickerMap = HashMap<String, RawTicker>;

/// One polling cycle's tickers across all three exchanges.
///
/// An exchange that failed to respond contributes an empty map; the cycle
/// still completes with whatever the other two returned.
#[derive(Debug, Clone, Default)]
pub struct ExchangeTickers {
    pub paribu: TickerMap,
    pub btcturk: TickerMap,
    pub binance: TickerMap,
}

/// Strip underscores from a pair symbol (e.g., "BTC_TRY" -> "BTCTRY").
///
/// BtcTurk has quoted pairs both with and without the separator, so both
/// map keys and lookups go through this before matching.
pub fn normalize_pair(pair: &str) -> String {
    pair.replace('_', "")
}
