//! Arbitrage opportunity type.

use crate::{CoinSnapshot, Exchange};
use serde::{Deserialize, Serialize};

/// A threshold-crossing price difference on one local exchange.
///
/// Carries the full snapshot it was detected on so consumers can show
/// prices without chasing the live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    /// Snapshot the opportunity was detected on.
    pub coin: CoinSnapshot,
    /// Local exchange whose difference crossed its threshold.
    pub exchange: Exchange,
    /// Percentage difference at detection time.
    pub difference: f64,
    /// True when the local price sits above the converted reference.
    pub is_positive: bool,
}

impl ArbitrageOpportunity {
    pub fn new(coin: CoinSnapshot, exchange: Exchange, difference: f64) -> Self {
        Self {
            coin,
            exchange,
            difference,
            is_positive: difference > 0.0,
        }
    }

    /// Absolute size of the difference, used for ranking.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.difference.abs()
    }

    /// Ticker symbol of the coin.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.coin.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === ArbitrageOpportunity tests ===

    #[test]
    fn test_opportunity_positive() {
        let coin = CoinSnapshot::new("BTC", "Bitcoin");
        let opp = ArbitrageOpportunity::new(coin, Exchange::Paribu, 3.5);
        assert!(opp.is_positive);
        assert_eq!(opp.difference, 3.5);
        assert_eq!(opp.magnitude(), 3.5);
        assert_eq!(opp.symbol(), "BTC");
    }

    #[test]
    fn test_opportunity_negative() {
        let coin = CoinSnapshot::new("ETH", "Ethereum");
        let opp = ArbitrageOpportunity::new(coin, Exchange::Btcturk, -4.2);
        assert!(!opp.is_positive);
        assert_eq!(opp.magnitude(), 4.2);
    }

    #[test]
    fn test_opportunity_zero_is_not_positive() {
        let coin = CoinSnapshot::new("XRP", "Ripple");
        let opp = ArbitrageOpportunity::new(coin, Exchange::Paribu, 0.0);
        assert!(!opp.is_positive);
    }
}
