use super::types::{OptionContract, Strategy};
use std::cmp::Ordering;

/// Strike the selector aims for: spot shifted by the moneyness percentage,
/// below spot for puts and above for calls, rounded to cents.
#[inline]
pub fn target_strike(strategy: Strategy, spot: f64, moneyness_pct: f64) -> f64 {
    let shifted = match strategy {
        Strategy::CashSecuredPut => spot * (1.0 - moneyness_pct / 100.0),
        Strategy::CoveredCall => spot * (1.0 + moneyness_pct / 100.0),
    };
    (shifted * 100.0).round() / 100.0
}

/// Pick the single near-the-money contract for one expiration.
///
/// Puts keep strikes at or below the target and take the highest; calls keep
/// strikes at or above the target and take the lowest. Near-the-money strikes
/// carry the richest time value relative to strike distance. `None` means the
/// moneyness filter left nothing -- a legitimate no-match, not an error.
///
/// Deterministic: identical chain and inputs always yield the same contract.
pub fn select_contract(
    chain: &[OptionContract],
    strategy: Strategy,
    spot: f64,
    moneyness_pct: f64,
) -> Option<OptionContract> {
    let target = target_strike(strategy, spot, moneyness_pct);

    match strategy {
        Strategy::CashSecuredPut => chain
            .iter()
            .filter(|c| c.strike <= target)
            .max_by(|a, b| cmp_strike(a, b))
            .copied(),
        Strategy::CoveredCall => chain
            .iter()
            .filter(|c| c.strike >= target)
            .min_by(|a, b| cmp_strike(a, b))
            .copied(),
    }
}

#[inline]
fn cmp_strike(a: &OptionContract, b: &OptionContract) -> Ordering {
    a.strike.partial_cmp(&b.strike).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn contract(strike: f64) -> OptionContract {
        OptionContract {
            strike,
            bid: 0.0,
            ask: 0.0,
            last_price: 1.0,
            expiration: NaiveDate::from_ymd_opt(2026, 9, 18).unwrap(),
        }
    }

    fn chain(strikes: &[f64]) -> Vec<OptionContract> {
        strikes.iter().copied().map(contract).collect()
    }

    #[test]
    fn test_target_strike_rounding() {
        assert_eq!(target_strike(Strategy::CashSecuredPut, 100.0, 10.0), 90.0);
        assert_eq!(target_strike(Strategy::CoveredCall, 100.0, 10.0), 110.0);
        // 33.333 * 0.9 = 29.9997 -> 30.00
        assert_eq!(target_strike(Strategy::CashSecuredPut, 33.333, 10.0), 30.0);
    }

    #[test]
    fn test_put_picks_highest_at_or_below_target() {
        let chain = chain(&[80.0, 85.0, 90.0, 95.0]);
        let picked = select_contract(&chain, Strategy::CashSecuredPut, 100.0, 10.0).unwrap();
        assert_eq!(picked.strike, 90.0);
    }

    #[test]
    fn test_call_picks_lowest_at_or_above_target() {
        let chain = chain(&[105.0, 115.0, 120.0]);
        let picked = select_contract(&chain, Strategy::CoveredCall, 100.0, 10.0).unwrap();
        assert_eq!(picked.strike, 115.0);
    }

    #[test]
    fn test_selection_bound_holds() {
        let strikes = [70.0, 82.5, 87.5, 92.5, 101.0];
        let chain = chain(&strikes);

        let target = target_strike(Strategy::CashSecuredPut, 100.0, 10.0);
        let put = select_contract(&chain, Strategy::CashSecuredPut, 100.0, 10.0).unwrap();
        assert!(put.strike <= target);
        for s in strikes.iter().filter(|s| **s <= target) {
            assert!(put.strike >= *s, "{} is closer to target than {}", s, put.strike);
        }

        let target = target_strike(Strategy::CoveredCall, 100.0, 10.0);
        let call = select_contract(&chain, Strategy::CoveredCall, 100.0, 10.0).unwrap();
        assert!(call.strike >= target);
        for s in strikes.iter().filter(|s| **s >= target) {
            assert!(call.strike <= *s);
        }
    }

    #[test]
    fn test_no_match_is_none() {
        // Every strike above a put target
        let chain = chain(&[95.0, 100.0, 105.0]);
        assert!(select_contract(&chain, Strategy::CashSecuredPut, 100.0, 10.0).is_none());
        // Empty chain
        assert!(select_contract(&[], Strategy::CoveredCall, 100.0, 10.0).is_none());
    }

    #[test]
    fn test_chain_order_does_not_matter() {
        let shuffled = chain(&[95.0, 80.0, 90.0, 85.0]);
        let picked = select_contract(&shuffled, Strategy::CashSecuredPut, 100.0, 10.0).unwrap();
        assert_eq!(picked.strike, 90.0);
    }
}
