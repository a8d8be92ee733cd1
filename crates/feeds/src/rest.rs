//! REST clients for the three exchange ticker endpoints.

use crate::FeedError;
use lira_core::{normalize_pair, ExchangeTickers, RawTicker, TickerMap};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Fetches the Paribu ticker board.
pub struct ParibuRestFetcher;

impl ParibuRestFetcher {
    const BASE_URL: &'static str = "https://www.paribu.com";

    /// Fetch tickers for every pair Paribu quotes.
    pub async fn fetch_tickers(client: &reqwest::Client) -> Result<TickerMap, FeedError> {
        let url = format!("{}/ticker", Self::BASE_URL);
        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::BadStatus(response.status().as_u16()));
        }

        let json: Value = response.json().await?;
        Self::parse_tickers(&json)
    }

    /// Parse the ticker board: a JSON object keyed by pair symbol
    /// (e.g., "BTC_TL"), each entry carrying `highestBid`, `lowestAsk`
    /// and `last` as numbers. Missing or null fields stay `None`.
    fn parse_tickers(json: &Value) -> Result<TickerMap, FeedError> {
        let entries = json
            .as_object()
            .ok_or_else(|| FeedError::ParseError("expected ticker object".to_string()))?;

        let mut tickers = HashMap::with_capacity(entries.len());
        for (pair, entry) in entries {
            let ticker = RawTicker::new(
                entry["highestBid"].as_f64(),
                entry["lowestAsk"].as_f64(),
                entry["last"].as_f64(),
            );
            tickers.insert(pair.clone(), ticker);
        }

        Ok(tickers)
    }
}

/// Fetches the BtcTurk ticker list.
pub struct BtcturkRestFetcher;

impl BtcturkRestFetcher {
    const BASE_URL: &'static str = "https://api.btcturk.com";

    /// Fetch tickers for every pair BtcTurk quotes.
    pub async fn fetch_tickers(client: &reqwest::Client) -> Result<TickerMap, FeedError> {
        let url = format!("{}/api/v2/ticker", Self::BASE_URL);
        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::BadStatus(response.status().as_u16()));
        }

        let json: Value = response.json().await?;
        Self::parse_tickers(&json)
    }

    /// Parse the ticker envelope: `{"success": true, "data": [...]}` with
    /// one row per pair. Map keys are normalized pair symbols so lookups
    /// match whether the venue writes "BTCTRY" or "BTC_TRY".
    fn parse_tickers(json: &Value) -> Result<TickerMap, FeedError> {
        if json["success"].as_bool() == Some(false) {
            return Err(FeedError::ParseError(
                "ticker response flagged unsuccessful".to_string(),
            ));
        }

        let rows = json["data"]
            .as_array()
            .ok_or_else(|| FeedError::ParseError("expected data array".to_string()))?;

        let mut tickers = HashMap::with_capacity(rows.len());
        for row in rows {
            let Some(pair) = row["pair"].as_str() else {
                continue;
            };
            let ticker = RawTicker::new(
                row["bid"].as_f64(),
                row["ask"].as_f64(),
                row["last"].as_f64(),
            );
            tickers.insert(normalize_pair(pair), ticker);
        }

        Ok(tickers)
    }
}

/// Fetches the Binance book ticker board.
pub struct BinanceRestFetcher;

impl BinanceRestFetcher {
    const BASE_URL: &'static str = "https://www.binance.com";

    /// Fetch best bid/ask for every symbol Binance quotes.
    pub async fn fetch_tickers(client: &reqwest::Client) -> Result<TickerMap, FeedError> {
        let url = format!("{}/api/v3/ticker/bookTicker", Self::BASE_URL);
        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::BadStatus(response.status().as_u16()));
        }

        let json: Value = response.json().await?;
        Self::parse_tickers(&json)
    }

    /// Parse the book ticker array. Prices arrive as decimal strings
    /// (e.g., "43250.10000000"); rows whose prices fail to parse keep
    /// `None`, rows without a symbol are skipped.
    fn parse_tickers(json: &Value) -> Result<TickerMap, FeedError> {
        let rows = json
            .as_array()
            .ok_or_else(|| FeedError::ParseError("expected ticker array".to_string()))?;

        let mut tickers = HashMap::with_capacity(rows.len());
        for row in rows {
            let Some(symbol) = row["symbol"].as_str() else {
                continue;
            };
            let bid = row["bidPrice"].as_str().and_then(|s| s.parse::<f64>().ok());
            let ask = row["askPrice"].as_str().and_then(|s| s.parse::<f64>().ok());
            tickers.insert(symbol.to_string(), RawTicker::new(bid, ask, None));
        }

        Ok(tickers)
    }
}

/// Fetch tickers from all three exchanges concurrently.
///
/// Each exchange that fails contributes an empty map and the cycle carries
/// on with whatever the others returned. Failures are logged at debug level
/// since a flaky endpoint during normal polling is not noteworthy.
pub async fn fetch_all_tickers(client: &reqwest::Client) -> ExchangeTickers {
    let (paribu, btcturk, binance) = tokio::join!(
        ParibuRestFetcher::fetch_tickers(client),
        BtcturkRestFetcher::fetch_tickers(client),
        BinanceRestFetcher::fetch_tickers(client),
    );

    ExchangeTickers {
        paribu: paribu.unwrap_or_else(|e| {
            debug!("Paribu REST: ticker fetch failed: {}", e);
            HashMap::new()
        }),
        btcturk: btcturk.unwrap_or_else(|e| {
            debug!("BtcTurk REST: ticker fetch failed: {}", e);
            HashMap::new()
        }),
        binance: binance.unwrap_or_else(|e| {
            debug!("Binance REST: ticker fetch failed: {}", e);
            HashMap::new()
        }),
    }
}
