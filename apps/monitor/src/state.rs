//! Observable market state.

use lira_core::{
    alert_active_key, catalog, refresh_duration, sound_level_key, threshold_key,
    ArbitrageOpportunity, CoinSnapshot, Exchange, ExchangeTickers, SettingsProvider,
    DEFAULT_ALERT_THRESHOLD, DEFAULT_REFRESH_SECS, GLOBAL_THRESHOLD_KEY, MAX_SOUND_LEVEL,
    REFRESH_RATE_KEY,
};
use lira_engine::{detect, ArbitrageCalculator, BridgeRates};
use std::sync::Arc;
use tokio::sync::watch;

/// Everything a consumer needs from one point in time.
///
/// Snapshots, the opportunities detected on them and the rates they were
/// priced with always describe the same instant; the store never publishes
/// them separately.
#[derive(Debug, Clone, Default)]
pub struct MarketView {
    /// One snapshot per cataloged coin, in catalog order.
    pub snapshots: Arc<Vec<CoinSnapshot>>,
    /// Opportunities ranked by descending magnitude.
    pub opportunities: Arc<Vec<ArbitrageOpportunity>>,
    /// Bridge rates the snapshots were priced with.
    pub rates: BridgeRates,
    /// Polling cycles published so far.
    pub cycle: u64,
    /// Wall-clock time of the last update, in milliseconds since the epoch.
    pub updated_at_ms: u64,
}

/// Observable store holding the latest [`MarketView`].
///
/// All writes go through the watch channel's write lock, so cycle publishes
/// and settings mutations serialize. A mutation landing while a cycle is
/// still fetching is not lost: the cycle's carry-forward reads the mutated
/// view inside the same critical section it publishes from.
pub struct MarketStore {
    view_tx: watch::Sender<MarketView>,
    calculator: ArbitrageCalculator,
    settings: Arc<dyn SettingsProvider>,
}

/// Shared store handle.
pub type SharedStore = Arc<MarketStore>;

/// Create a shared store.
pub fn create_store(settings: Arc<dyn SettingsProvider>) -> SharedStore {
    Arc::new(MarketStore::new(settings))
}

impl MarketStore {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        let (view_tx, _) = watch::channel(MarketView::default());
        Self {
            view_tx,
            calculator: ArbitrageCalculator::new(settings.clone()),
            settings,
        }
    }

    /// Subscribe to view updates.
    ///
    /// The receiver can read the current view immediately and is notified
    /// of every later publish; a slow consumer only ever observes the
    /// latest value, never a backlog.
    pub fn subscribe(&self) -> watch::Receiver<MarketView> {
        self.view_tx.subscribe()
    }

    /// The latest published view.
    pub fn current(&self) -> MarketView {
        self.view_tx.borrow().clone()
    }

    /// Price one polling cycle and publish the resulting view.
    pub fn publish_cycle(&self, tickers: &ExchangeTickers, rates: BridgeRates) {
        self.view_tx.send_modify(|view| {
            let snapshots = self.calculator.calculate(tickers, rates, &view.snapshots);
            let opportunities = detect(&snapshots);

            view.snapshots = Arc::new(snapshots);
            view.opportunities = Arc::new(opportunities);
            view.rates = rates;
            view.cycle += 1;
            view.updated_at_ms = now_ms();
        });
    }

    /// Set one coin's alert threshold on one local exchange.
    pub fn set_asset_threshold(&self, symbol: &str, exchange: Exchange, threshold: f64) {
        self.settings
            .put_f64(&threshold_key(symbol, exchange), threshold);
        self.apply(|snapshot| {
            if snapshot.symbol == symbol {
                if let Some(alert) = snapshot.alert_mut(exchange) {
                    alert.threshold = threshold;
                }
            }
        });
    }

    /// Set every coin's threshold on both local exchanges and remember the
    /// value as the global default.
    pub fn set_all_thresholds(&self, threshold: f64) {
        self.settings.put_f64(GLOBAL_THRESHOLD_KEY, threshold);
        for coin in catalog::coins() {
            for &exchange in Exchange::locals() {
                self.settings
                    .put_f64(&threshold_key(coin.symbol, exchange), threshold);
            }
        }
        self.apply(|snapshot| {
            snapshot.paribu_alert.threshold = threshold;
            snapshot.btcturk_alert.threshold = threshold;
        });
    }

    /// The persisted global threshold default.
    pub fn global_threshold(&self) -> f64 {
        self.settings
            .get_f64(GLOBAL_THRESHOLD_KEY, DEFAULT_ALERT_THRESHOLD)
    }

    /// Set one coin's alert sound level on one local exchange.
    pub fn set_asset_sound_level(&self, symbol: &str, exchange: Exchange, level: u8) {
        let level = level.min(MAX_SOUND_LEVEL);
        self.settings
            .put_i64(&sound_level_key(symbol, exchange), level as i64);
        self.apply(|snapshot| {
            if snapshot.symbol == symbol {
                if let Some(alert) = snapshot.alert_mut(exchange) {
                    alert.sound_level = level;
                }
            }
        });
    }

    /// Set every coin's sound level on both local exchanges.
    pub fn set_all_sound_levels(&self, level: u8) {
        let level = level.min(MAX_SOUND_LEVEL);
        for coin in catalog::coins() {
            for &exchange in Exchange::locals() {
                self.settings
                    .put_i64(&sound_level_key(coin.symbol, exchange), level as i64);
            }
        }
        self.apply(|snapshot| {
            snapshot.paribu_alert.sound_level = level;
            snapshot.btcturk_alert.sound_level = level;
        });
    }

    /// Turn alerting on or off for one coin on one local exchange.
    pub fn set_alert_active(&self, symbol: &str, exchange: Exchange, active: bool) {
        self.settings
            .put_bool(&alert_active_key(symbol, exchange), active);
        self.apply(|snapshot| {
            if snapshot.symbol == symbol {
                if let Some(alert) = snapshot.alert_mut(exchange) {
                    alert.active = active;
                }
            }
        });
    }

    /// Persist the poll interval in seconds. Values no timer can honor
    /// reset to the default instead of poisoning the loop.
    pub fn set_refresh_rate(&self, secs: f64) {
        let secs = if refresh_duration(secs).is_some() {
            secs
        } else {
            DEFAULT_REFRESH_SECS
        };
        self.settings.put_f64(REFRESH_RATE_KEY, secs);
    }

    /// Apply a settings mutation to the current snapshots, re-detect and
    /// publish. Runs entirely inside the watch write lock, so a concurrent
    /// cycle publish cannot interleave.
    fn apply(&self, update: impl Fn(&mut CoinSnapshot)) {
        self.view_tx.send_modify(|view| {
            let mut snapshots = view.snapshots.as_ref().clone();
            for snapshot in &mut snapshots {
                update(snapshot);
            }
            view.opportunities = Arc::new(detect(&snapshots));
            view.snapshots = Arc::new(snapshots);
            view.updated_at_ms = now_ms();
        });
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use lira_core::{MemorySettings, RawTicker};

    fn store_with_settings() -> (SharedStore, Arc<MemorySettings>) {
        let settings = Arc::new(MemorySettings::new());
        (create_store(settings.clone()), settings)
    }

    fn btc_tickers(paribu_bid: f64, binance_ask: f64) -> ExchangeTickers {
        let mut tickers = ExchangeTickers::default();
        tickers.paribu.insert(
            "BTC_TL".to_string(),
            RawTicker::new(Some(paribu_bid), None, None),
        );
        tickers.binance.insert(
            "BTCUSDT".to_string(),
            RawTicker::new(None, Some(binance_ask), None),
        );
        tickers
    }

    fn unit_rates() -> BridgeRates {
        BridgeRates {
            paribu_usdt_try: 1.0,
            btcturk_usdt_try: 1.0,
        }
    }

    // === View lifecycle tests ===

    #[test]
    fn test_initial_view_is_empty() {
        let (store, _) = store_with_settings();
        let view = store.current();
        assert_eq!(view.cycle, 0);
        assert!(view.snapshots.is_empty());
        assert!(view.opportunities.is_empty());
        assert_eq!(view.rates, BridgeRates::default());
    }

    #[test]
    fn test_publish_cycle_fills_view() {
        let (store, _) = store_with_settings();
        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());

        let view = store.current();
        assert_eq!(view.cycle, 1);
        assert_eq!(view.snapshots.len(), catalog::coins().len());
        assert_eq!(view.rates, unit_rates());
        assert!(view.updated_at_ms > 0);

        // 110 vs 100 converted at 1.0 is ~9.09%, above the 2.5 default.
        assert_eq!(view.opportunities.len(), 1);
        let opp = &view.opportunities[0];
        assert_eq!(opp.symbol(), "BTC");
        assert_eq!(opp.exchange, Exchange::Paribu);
        assert!(opp.is_positive);
        assert!((opp.difference - 9.090909090909092).abs() < 1e-12);
    }

    #[test]
    fn test_publish_below_threshold_yields_no_opportunities() {
        let (store, _) = store_with_settings();
        // 100.99 vs 100 is ~0.98%, under the 2.5 default.
        store.publish_cycle(&btc_tickers(100.99, 100.0), unit_rates());

        let view = store.current();
        assert_eq!(view.cycle, 1);
        assert!(view.opportunities.is_empty());
    }

    #[test]
    fn test_cycle_counter_increments() {
        let (store, _) = store_with_settings();
        let tickers = ExchangeTickers::default();
        store.publish_cycle(&tickers, BridgeRates::default());
        store.publish_cycle(&tickers, BridgeRates::default());
        store.publish_cycle(&tickers, BridgeRates::default());
        assert_eq!(store.current().cycle, 3);
    }

    #[tokio::test]
    async fn test_subscriber_observes_publishes() {
        let (store, _) = store_with_settings();
        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());

        // A late subscriber can read the current view right away.
        let mut rx = store.subscribe();
        assert_eq!(rx.borrow().cycle, 1);

        store.publish_cycle(&btc_tickers(112.0, 100.0), unit_rates());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().cycle, 2);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_sees_only_latest() {
        let (store, _) = store_with_settings();
        let mut rx = store.subscribe();

        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());
        store.publish_cycle(&btc_tickers(111.0, 100.0), unit_rates());
        store.publish_cycle(&btc_tickers(112.0, 100.0), unit_rates());

        rx.changed().await.unwrap();
        let view = rx.borrow_and_update().clone();
        assert_eq!(view.cycle, 3);
        let btc = view.snapshots.iter().find(|s| s.symbol == "BTC").unwrap();
        assert_eq!(btc.paribu_price, 112.0);
    }

    // === Mutation tests ===

    #[test]
    fn test_set_asset_threshold_persists_and_redetects() {
        let (store, settings) = store_with_settings();
        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());
        assert_eq!(store.current().opportunities.len(), 1);

        store.set_asset_threshold("BTC", Exchange::Paribu, 15.0);

        assert_eq!(settings.get_f64("BTC_threshold", 2.5), 15.0);
        let view = store.current();
        let btc = view.snapshots.iter().find(|s| s.symbol == "BTC").unwrap();
        assert_eq!(btc.paribu_alert.threshold, 15.0);
        assert_eq!(btc.btcturk_alert.threshold, 2.5);
        assert!(view.opportunities.is_empty());
    }

    #[test]
    fn test_threshold_mutation_survives_next_cycle() {
        let (store, _) = store_with_settings();
        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());
        store.set_asset_threshold("BTC", Exchange::Paribu, 15.0);

        // The next cycle carries the mutated settings forward.
        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());

        let view = store.current();
        let btc = view.snapshots.iter().find(|s| s.symbol == "BTC").unwrap();
        assert_eq!(btc.paribu_alert.threshold, 15.0);
        assert!(view.opportunities.is_empty());
    }

    #[test]
    fn test_mutation_before_first_cycle_loads_from_settings() {
        let (store, _) = store_with_settings();
        // No snapshots yet, so only the persisted value records it.
        store.set_asset_threshold("BTC", Exchange::Paribu, 15.0);

        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());
        let view = store.current();
        let btc = view.snapshots.iter().find(|s| s.symbol == "BTC").unwrap();
        assert_eq!(btc.paribu_alert.threshold, 15.0);
        assert!(view.opportunities.is_empty());
    }

    #[test]
    fn test_set_all_thresholds() {
        let (store, settings) = store_with_settings();
        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());

        store.set_all_thresholds(20.0);

        assert_eq!(store.global_threshold(), 20.0);
        assert_eq!(settings.get_f64("ETH_threshold", 2.5), 20.0);
        assert_eq!(settings.get_f64("ETH_threshold_btc", 2.5), 20.0);

        let view = store.current();
        for snapshot in view.snapshots.iter() {
            assert_eq!(snapshot.paribu_alert.threshold, 20.0);
            assert_eq!(snapshot.btcturk_alert.threshold, 20.0);
        }
        assert!(view.opportunities.is_empty());
    }

    #[test]
    fn test_set_alert_active_suppresses_and_restores() {
        let (store, settings) = store_with_settings();
        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());

        store.set_alert_active("BTC", Exchange::Paribu, false);
        assert!(!settings.get_bool("BTC_alert_active", true));
        assert!(store.current().opportunities.is_empty());

        store.set_alert_active("BTC", Exchange::Paribu, true);
        assert_eq!(store.current().opportunities.len(), 1);
    }

    #[test]
    fn test_set_sound_levels_clamp() {
        let (store, settings) = store_with_settings();
        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());

        store.set_asset_sound_level("BTC", Exchange::Btcturk, 99);
        assert_eq!(settings.get_i64("BTC_sound_level_btc", 15), 15);

        store.set_all_sound_levels(7);
        let view = store.current();
        let btc = view.snapshots.iter().find(|s| s.symbol == "BTC").unwrap();
        assert_eq!(btc.paribu_alert.sound_level, 7);
        assert_eq!(btc.btcturk_alert.sound_level, 7);
    }

    #[test]
    fn test_sound_level_change_keeps_opportunities() {
        let (store, _) = store_with_settings();
        store.publish_cycle(&btc_tickers(110.0, 100.0), unit_rates());

        store.set_asset_sound_level("BTC", Exchange::Paribu, 3);
        assert_eq!(store.current().opportunities.len(), 1);
    }

    #[test]
    fn test_set_refresh_rate_guards_bad_values() {
        let (store, settings) = store_with_settings();

        store.set_refresh_rate(1.5);
        assert_eq!(settings.get_f64(REFRESH_RATE_KEY, 2.0), 1.5);

        store.set_refresh_rate(0.0);
        assert_eq!(settings.get_f64(REFRESH_RATE_KEY, 0.0), DEFAULT_REFRESH_SECS);

        store.set_refresh_rate(f64::NAN);
        assert_eq!(settings.get_f64(REFRESH_RATE_KEY, 0.0), DEFAULT_REFRESH_SECS);
    }

    #[test]
    fn test_set_refresh_rate_rejects_oversized_values() {
        let (store, settings) = store_with_settings();

        // More seconds than a Duration can hold.
        store.set_refresh_rate(1e20);
        assert_eq!(settings.get_f64(REFRESH_RATE_KEY, 0.0), DEFAULT_REFRESH_SECS);
    }

    #[test]
    fn test_opportunities_ranked_by_magnitude() {
        let (store, _) = store_with_settings();
        let mut tickers = btc_tickers(110.0, 100.0);
        tickers.paribu.insert(
            "ETH_TL".to_string(),
            RawTicker::new(Some(80.0), None, None),
        );
        tickers.binance.insert(
            "ETHUSDT".to_string(),
            RawTicker::new(None, Some(100.0), None),
        );

        store.publish_cycle(&tickers, unit_rates());

        let view = store.current();
        assert_eq!(view.opportunities.len(), 2);
        // ETH at -25% outranks BTC at ~9.09%.
        assert_eq!(view.opportunities[0].symbol(), "ETH");
        assert!(!view.opportunities[0].is_positive);
        assert_eq!(view.opportunities[1].symbol(), "BTC");
    }
}
