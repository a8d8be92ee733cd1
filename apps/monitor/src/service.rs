//! Polling service driving the fetch, price, publish loop.

use crate::state::SharedStore;
use futures_util::FutureExt;
use lira_core::{refresh_duration, SettingsProvider, DEFAULT_REFRESH_SECS, REFRESH_RATE_KEY};
use lira_engine::RateResolver;
use lira_feeds::TickerSource;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Drives polling: fetch tickers, resolve rates, publish the view, sleep,
/// repeat. Cycles never overlap; the next one starts only after the current
/// cycle finishes and its interval elapses.
pub struct PollService {
    store: SharedStore,
    source: Arc<dyn TickerSource>,
    settings: Arc<dyn SettingsProvider>,
    default_refresh: Duration,
    fault_backoff: Duration,
    running: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PollService {
    pub fn new(
        store: SharedStore,
        source: Arc<dyn TickerSource>,
        settings: Arc<dyn SettingsProvider>,
        default_refresh_secs: f64,
        fault_backoff: Duration,
    ) -> Self {
        let default_refresh = refresh_duration(default_refresh_secs)
            .unwrap_or_else(|| Duration::from_secs_f64(DEFAULT_REFRESH_SECS));

        let (shutdown_tx, _) = watch::channel(false);
        Self {
            store,
            source,
            settings,
            default_refresh,
            fault_backoff,
            running: AtomicBool::new(false),
            shutdown_tx,
            handle: Mutex::new(None),
        }
    }

    /// Start the poll loop. Starting an already-running service is a no-op.
    pub async fn start(self: &Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("poll service already running");
            return;
        }
        self.shutdown_tx.send_replace(false);

        let service = self.clone();
        let handle = tokio::spawn(async move {
            service.run_loop().await;
        });
        *self.handle.lock().await = Some(handle);
        info!("Poll service started");
    }

    /// Stop the poll loop and wait for it to wind down, interrupting any
    /// in-flight sleep or fetch. Stopping a stopped service is a no-op.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            debug!("poll service already stopped");
            return;
        }
        self.shutdown_tx.send_replace(true);

        if let Some(handle) = self.handle.lock().await.take() {
            if let Err(e) = handle.await {
                warn!("poll loop ended abnormally: {}", e);
            }
        }
        info!("Poll service stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn run_loop(&self) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut resolver = RateResolver::new();

        while self.is_running() {
            let cycle = AssertUnwindSafe(self.run_cycle(&mut resolver)).catch_unwind();
            let outcome = tokio::select! {
                outcome = cycle => outcome,
                _ = shutdown_rx.changed() => break,
            };

            let delay = match outcome {
                Ok(()) => self.refresh_interval(),
                Err(_) => {
                    warn!(
                        "polling cycle panicked, backing off {:?}",
                        self.fault_backoff
                    );
                    self.fault_backoff
                }
            };

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown_rx.changed() => break,
            }
        }

        info!("Poll loop stopped");
    }

    async fn run_cycle(&self, resolver: &mut RateResolver) {
        let started = Instant::now();
        let tickers = self.source.fetch_all().await;
        let rates = resolver.resolve(&tickers.paribu, &tickers.btcturk);
        self.store.publish_cycle(&tickers, rates);

        let view = self.store.current();
        debug!(
            "cycle {} published: {} coins, {} opportunities, {} ms",
            view.cycle,
            view.snapshots.len(),
            view.opportunities.len(),
            started.elapsed().as_millis()
        );
    }

    /// Poll interval for the next cycle, re-read every cycle so a persisted
    /// `refresh_rate` change takes effect without a restart. Values no timer
    /// can honor fall back to the service default.
    fn refresh_interval(&self) -> Duration {
        let secs = self
            .settings
            .get_f64(REFRESH_RATE_KEY, self.default_refresh.as_secs_f64());
        refresh_duration(secs).unwrap_or(self.default_refresh)
    }
}
