//! Opportunity detection over computed snapshots.

use lira_core::{ArbitrageOpportunity, CoinSnapshot, Exchange};

/// Collect every threshold-crossing difference across the snapshots.
///
/// A snapshot contributes at most one opportunity per local exchange, and
/// only while its alert is active and the absolute difference strictly
/// exceeds that exchange's threshold. The result is ordered by descending
/// magnitude; equal magnitudes keep their snapshot order.
pub fn detect(snapshots: &[CoinSnapshot]) -> Vec<ArbitrageOpportunity> {
    let mut opportunities = Vec::new();

    for snapshot in snapshots {
        for &exchange in Exchange::locals() {
            let Some(alert) = snapshot.alert(exchange) else {
                continue;
            };
            let difference = snapshot.difference(exchange);
            if alert.active && difference.abs() > alert.threshold {
                opportunities.push(ArbitrageOpportunity::new(
                    snapshot.clone(),
                    exchange,
                    difference,
                ));
            }
        }
    }

    // Stable sort, so ties stay in snapshot order.
    opportunities.sort_by(|a, b| b.magnitude().total_cmp(&a.magnitude()));
    opportunities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(symbol: &str, paribu_diff: f64, btcturk_diff: f64) -> CoinSnapshot {
        let mut snapshot = CoinSnapshot::new(symbol, symbol);
        snapshot.paribu_difference = paribu_diff;
        snapshot.btcturk_difference = btcturk_diff;
        snapshot
    }

    // === detect tests ===

    #[test]
    fn test_detect_empty() {
        assert!(detect(&[]).is_empty());
    }

    #[test]
    fn test_detect_nothing_below_threshold() {
        // Default threshold is 2.5.
        let snapshots = vec![snapshot("BTC", 1.0, -2.0), snapshot("ETH", 0.0, 2.4)];
        assert!(detect(&snapshots).is_empty());
    }

    #[test]
    fn test_detect_requires_strictly_greater() {
        let mut s = snapshot("BTC", 2.5, 0.0);
        s.paribu_alert.threshold = 2.5;
        assert!(detect(&[s.clone()]).is_empty());

        s.paribu_difference = 2.5000001;
        assert_eq!(detect(&[s]).len(), 1);
    }

    #[test]
    fn test_detect_positive_and_negative_crossings() {
        let snapshots = vec![snapshot("BTC", 3.0, 0.0), snapshot("ETH", -4.0, 0.0)];
        let opportunities = detect(&snapshots);

        assert_eq!(opportunities.len(), 2);
        // -4.0 outranks 3.0 by magnitude.
        assert_eq!(opportunities[0].symbol(), "ETH");
        assert!(!opportunities[0].is_positive);
        assert_eq!(opportunities[1].symbol(), "BTC");
        assert!(opportunities[1].is_positive);
    }

    #[test]
    fn test_detect_per_exchange_thresholds() {
        let mut s = snapshot("BTC", 3.0, 3.0);
        s.paribu_alert.threshold = 5.0;
        s.btcturk_alert.threshold = 2.0;

        let opportunities = detect(&[s]);
        assert_eq!(opportunities.len(), 1);
        assert_eq!(opportunities[0].exchange, Exchange::Btcturk);
    }

    #[test]
    fn test_detect_both_exchanges_for_one_coin() {
        let s = snapshot("BTC", 4.0, -3.5);
        let opportunities = detect(&[s]);

        assert_eq!(opportunities.len(), 2);
        assert_eq!(opportunities[0].exchange, Exchange::Paribu);
        assert_eq!(opportunities[1].exchange, Exchange::Btcturk);
    }

    #[test]
    fn test_detect_inactive_alert_suppresses() {
        let mut s = snapshot("BTC", 10.0, 10.0);
        s.paribu_alert.active = false;

        let opportunities = detect(&[s]);
        assert_eq!(opportunities.len(), 1);
        assert_eq!(opportunities[0].exchange, Exchange::Btcturk);
    }

    #[test]
    fn test_detect_ranking_is_stable_for_ties() {
        let snapshots = vec![
            snapshot("BTC", 3.0, 0.0),
            snapshot("ETH", -3.0, 0.0),
            snapshot("XRP", 5.0, 0.0),
        ];
        let opportunities = detect(&snapshots);

        assert_eq!(opportunities.len(), 3);
        assert_eq!(opportunities[0].symbol(), "XRP");
        // BTC and ETH tie at magnitude 3.0; snapshot order decides.
        assert_eq!(opportunities[1].symbol(), "BTC");
        assert_eq!(opportunities[2].symbol(), "ETH");
    }

    #[test]
    fn test_detect_carries_snapshot() {
        let mut s = snapshot("BTC", 3.0, 0.0);
        s.paribu_price = 4300.0;
        let opportunities = detect(&[s]);

        assert_eq!(opportunities[0].coin.paribu_price, 4300.0);
        assert_eq!(opportunities[0].difference, 3.0);
    }
}
