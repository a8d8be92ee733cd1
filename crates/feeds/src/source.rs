//! Ticker source seam between the fetchers and the poll loop.

use crate::{fetch_all_tickers, FeedError};
use async_trait::async_trait;
use lira_core::ExchangeTickers;
use std::time::Duration;

/// Default timeout for ticker requests.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Produces one polling cycle's worth of tickers.
///
/// The poll loop only sees this trait; tests drive it with canned data
/// instead of live endpoints.
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Fetch all three exchanges' tickers for one cycle.
    async fn fetch_all(&self) -> ExchangeTickers;
}

/// Live source backed by the exchange REST endpoints.
pub struct RestTickerSource {
    client: reqwest::Client,
}

impl RestTickerSource {
    /// Build a source with the default request timeout.
    pub fn new() -> Result<Self, FeedError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Build a source with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::ConnectionFailed(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TickerSource for RestTickerSource {
    async fn fetch_all(&self) -> ExchangeTickers {
        fetch_all_tickers(&self.client).await
    }
}
