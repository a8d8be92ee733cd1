//! USDT/TRY bridge rate tracking.
//!
//! Binance quotes in USDT while the local venues quote in TRY, so every
//! comparison hangs off a USDT/TRY rate. Each local exchange supplies its
//! own rate through the USDT pair on its ticker board.

use lira_core::{Exchange, TickerMap};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Paribu pair the USDT/TRY rate is read from.
pub const PARIBU_BRIDGE_PAIR: &str = "USDT_TL";
/// BtcTurk pair the USDT/TRY rate is read from (normalized form).
pub const BTCTURK_BRIDGE_PAIR: &str = "USDTTRY";

/// USDT/TRY conversion rates, one per local exchange.
///
/// A rate of 0.0 means no usable quote has been seen yet; conversions
/// with it yield 0.0 rather than an invented price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeRates {
    /// USDT best ask on Paribu, in TRY.
    pub paribu_usdt_try: f64,
    /// USDT best ask on BtcTurk, in TRY.
    pub btcturk_usdt_try: f64,
}

impl BridgeRates {
    /// Rate used when converting reference prices for the given local
    /// exchange. Zero for the reference market itself.
    pub fn usdt_try_for(self, exchange: Exchange) -> f64 {
        match exchange {
            Exchange::Paribu => self.paribu_usdt_try,
            Exchange::Btcturk => self.btcturk_usdt_try,
            Exchange::Binance => 0.0,
        }
    }
}

/// Tracks bridge rates across polling cycles.
///
/// A cycle without a usable bridge quote (pair missing, ask absent, zero,
/// negative or non-finite) keeps the previous cycle's rate instead of
/// zeroing every conversion over one bad response.
#[derive(Debug, Default)]
pub struct RateResolver {
    rates: BridgeRates,
}

impl RateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one cycle's local tickers into the tracked rates and return
    /// the rates the cycle should be priced with.
    pub fn resolve(&mut self, paribu: &TickerMap, btcturk: &TickerMap) -> BridgeRates {
        if let Some(rate) = extract_rate(paribu, PARIBU_BRIDGE_PAIR) {
            self.rates.paribu_usdt_try = rate;
        } else {
            debug!(
                "no usable {} quote, keeping rate {}",
                PARIBU_BRIDGE_PAIR, self.rates.paribu_usdt_try
            );
        }

        if let Some(rate) = extract_rate(btcturk, BTCTURK_BRIDGE_PAIR) {
            self.rates.btcturk_usdt_try = rate;
        } else {
            debug!(
                "no usable {} quote, keeping rate {}",
                BTCTURK_BRIDGE_PAIR, self.rates.btcturk_usdt_try
            );
        }

        self.rates
    }

    /// Rates as of the last `resolve` call.
    pub fn current(&self) -> BridgeRates {
        self.rates
    }
}

/// Ask price of the bridge pair, if present, finite and strictly positive.
fn extract_rate(tickers: &TickerMap, pair: &str) -> Option<f64> {
    let ask = tickers.get(pair)?.ask?;
    (ask.is_finite() && ask > 0.0).then_some(ask)
}
