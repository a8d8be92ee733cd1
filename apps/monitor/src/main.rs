//! Lira arbitrage monitor.
//!
//! Polls Paribu and BtcTurk (TRY markets) alongside Binance (USDT reference),
//! bridges the reference prices into lira and alerts when the percentage
//! difference on a coin crosses its configured threshold.

mod config;
mod service;
mod settings;
mod state;

use crate::config::AppConfig;
use crate::service::PollService;
use crate::settings::JsonSettingsStore;
use crate::state::{create_store, MarketView, SharedStore};
use clap::Parser;
use lira_core::{Exchange, SettingsProvider};
use lira_feeds::RestTickerSource;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Lira Monitor CLI
#[derive(Parser, Debug)]
#[command(name = "lira-monitor")]
#[command(about = "TRY/USDT crypto arbitrage monitor", long_about = None)]
struct Args {
    /// Path of the persisted settings file
    #[arg(short, long, default_value = "lira-settings.json")]
    settings: String,

    /// Poll interval in seconds (a persisted refresh_rate takes precedence)
    #[arg(short, long, default_value_t = 2.0)]
    refresh: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Logs every opportunity the moment it first crosses its threshold, then
/// stays quiet until it clears and crosses again. Opportunities already open
/// when the reporter starts are announced right away.
async fn run_alert_reporter(store: SharedStore) {
    let mut active: HashSet<(String, Exchange)> = HashSet::new();
    let mut view_rx = store.subscribe();

    loop {
        let view = view_rx.borrow_and_update().clone();
        announce_new_alerts(&view, &mut active);
        if view_rx.changed().await.is_err() {
            break;
        }
    }
}

/// Logs the opportunities in `view` not yet in `active`, then replaces
/// `active` with the view's current set. Returns how many were announced.
fn announce_new_alerts(view: &MarketView, active: &mut HashSet<(String, Exchange)>) -> usize {
    let mut announced = 0;
    for opp in view.opportunities.iter() {
        let key = (opp.symbol().to_string(), opp.exchange);
        if !active.contains(&key) {
            announced += 1;
            info!(
                "💰 {} on {}: {:+.2}% (local {:.4}, sound level {})",
                opp.symbol(),
                opp.exchange.as_str(),
                opp.difference,
                if opp.exchange == Exchange::Paribu {
                    opp.coin.paribu_price
                } else {
                    opp.coin.btcturk_price
                },
                opp.coin
                    .alert(opp.exchange)
                    .map(|alert| alert.sound_level)
                    .unwrap_or(0),
            );
        }
    }
    *active = view
        .opportunities
        .iter()
        .map(|opp| (opp.symbol().to_string(), opp.exchange))
        .collect();
    announced
}

/// Periodic one-line summary of the published view.
async fn run_stats_reporter(store: SharedStore, service: Arc<PollService>) {
    let mut last_report = Instant::now();
    while service.is_running() {
        if last_report.elapsed() >= Duration::from_secs(60) {
            let view = store.current();
            info!(
                "📊 cycle {}: {} coins, {} open opportunities, USDT/TRY {:.4} (Paribu) {:.4} (BtcTurk)",
                view.cycle,
                view.snapshots.len(),
                view.opportunities.len(),
                view.rates.paribu_usdt_try,
                view.rates.btcturk_usdt_try,
            );
            last_report = Instant::now();
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    info!("Stats reporter stopped");
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("🚀 Lira arbitrage monitor starting");
    info!("  Settings file: {}", args.settings);
    info!("  Refresh: {}s", args.refresh);

    let mut config = AppConfig::default();
    config.refresh_secs = args.refresh;
    config.settings_path = args.settings.into();
    config.log_level = args.log_level;

    let settings: Arc<dyn SettingsProvider> = {
        let store = JsonSettingsStore::open(&config.settings_path);
        if !store.is_empty() {
            info!("Loaded {} persisted settings", store.len());
        }
        Arc::new(store)
    };

    let source = match RestTickerSource::with_timeout(Duration::from_secs(config.http_timeout_secs))
    {
        Ok(source) => Arc::new(source),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let store = create_store(settings.clone());
    let service = Arc::new(PollService::new(
        store.clone(),
        source,
        settings,
        config.refresh_secs,
        Duration::from_secs(config.fault_backoff_secs),
    ));

    service.start().await;

    let alert_reporter = tokio::spawn(run_alert_reporter(store.clone()));
    let stats_reporter = tokio::spawn(run_stats_reporter(store.clone(), service.clone()));

    info!("Press Ctrl+C to stop...");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");

    warn!("Shutdown signal received");
    service.stop().await;
    alert_reporter.abort();
    let _ = stats_reporter.await;

    let view = store.current();
    info!(
        "👋 Stopped after {} cycles with {} open opportunities",
        view.cycle,
        view.opportunities.len()
    );
}
