//! Per-coin arbitrage math.
//!
//! Turns one cycle's raw tickers into coin snapshots: local bids against
//! the bridge-converted Binance ask, with the percentage difference each
//! local market shows over the reference.

use crate::BridgeRates;
use lira_core::{
    catalog, load_alert_settings, normalize_pair, CoinSnapshot, CoinSpec, Exchange,
    ExchangeTickers, SettingsProvider,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const PERCENTAGE_MULTIPLIER: f64 = 100.0;

/// Computes one cycle's snapshots from raw tickers and bridge rates.
pub struct ArbitrageCalculator {
    settings: Arc<dyn SettingsProvider>,
}

impl ArbitrageCalculator {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self { settings }
    }

    /// Build snapshots for every cataloged coin.
    ///
    /// Alert settings carry forward from the previous cycle's snapshot for
    /// the same symbol when one exists, otherwise they load from persisted
    /// settings. A coin whose arithmetic goes non-finite is dropped for
    /// this cycle only and computed fresh on the next.
    pub fn calculate(
        &self,
        tickers: &ExchangeTickers,
        rates: BridgeRates,
        previous: &[CoinSnapshot],
    ) -> Vec<CoinSnapshot> {
        let prev_by_symbol: HashMap<&str, &CoinSnapshot> = previous
            .iter()
            .map(|snapshot| (snapshot.symbol.as_str(), snapshot))
            .collect();

        catalog::coins()
            .iter()
            .filter_map(|coin| {
                let previous = prev_by_symbol.get(coin.symbol).copied();
                let snapshot = self.calculate_coin(coin, tickers, rates, previous);
                if snapshot.is_none() {
                    debug!("{}: non-finite arithmetic, dropped for this cycle", coin.symbol);
                }
                snapshot
            })
            .collect()
    }

    fn calculate_coin(
        &self,
        coin: &CoinSpec,
        tickers: &ExchangeTickers,
        rates: BridgeRates,
        previous: Option<&CoinSnapshot>,
    ) -> Option<CoinSnapshot> {
        // Local venues price by best bid, the reference by best ask. 0.0
        // stands in for a quote the exchange did not deliver this cycle.
        let paribu_price = tickers
            .paribu
            .get(coin.paribu_pair)
            .and_then(|t| t.bid)
            .unwrap_or(0.0);
        let btcturk_price = tickers
            .btcturk
            .get(normalize_pair(coin.btcturk_pair).as_str())
            .and_then(|t| t.bid)
            .unwrap_or(0.0);
        let binance_price_usd = tickers
            .binance
            .get(coin.binance_pair)
            .and_then(|t| t.ask)
            .unwrap_or(0.0);

        let binance_price_paribu = convert(binance_price_usd, rates.paribu_usdt_try);
        let binance_price_btcturk = convert(binance_price_usd, rates.btcturk_usdt_try);

        let paribu_difference = percent_difference(paribu_price, binance_price_paribu);
        let btcturk_difference = percent_difference(btcturk_price, binance_price_btcturk);

        let computed = [
            paribu_price,
            btcturk_price,
            binance_price_usd,
            binance_price_paribu,
            binance_price_btcturk,
            paribu_difference,
            btcturk_difference,
        ];
        if computed.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let (paribu_alert, btcturk_alert) = match previous {
            Some(prev) => (prev.paribu_alert, prev.btcturk_alert),
            None => (
                load_alert_settings(self.settings.as_ref(), coin.symbol, Exchange::Paribu),
                load_alert_settings(self.settings.as_ref(), coin.symbol, Exchange::Btcturk),
            ),
        };

        Some(CoinSnapshot {
            symbol: coin.symbol.into(),
            name: coin.name.into(),
            paribu_price,
            btcturk_price,
            binance_price_paribu,
            binance_price_btcturk,
            binance_price_usd,
            paribu_difference,
            btcturk_difference,
            paribu_alert,
            btcturk_alert,
        })
    }
}

/// Convert a USDT price to TRY with the given bridge rate.
/// An unknown rate (zero or less) converts to 0.0.
pub fn convert(price_usd: f64, usdt_try_rate: f64) -> f64 {
    if usdt_try_rate > 0.0 {
        price_usd * usdt_try_rate
    } else {
        0.0
    }
}

/// Percentage difference of a local price over the converted reference,
/// positive when the local market is more expensive.
///
/// Defined only when both prices are strictly positive; otherwise 0.0.
pub fn percent_difference(local: f64, converted_reference: f64) -> f64 {
    if local > 0.0 && converted_reference > 0.0 {
        ((local - converted_reference) * PERCENTAGE_MULTIPLIER) / local
    } else {
        0.0
    }
}
