use super::types::OptionContract;
use chrono::NaiveDate;

/// Premium and return figures for one selected contract. Stack-allocated.
#[derive(Debug, Clone, Copy)]
pub struct RoiFigures {
    pub premium: f64,
    /// Whole days until expiration; zero or negative for same-day or expired
    /// inputs.
    pub days_to_expiration: i64,
    /// Premium as a percentage of strike (capital at risk).
    pub absolute_roi_pct: f64,
    /// Absolute ROI normalized to a 365-day year; exactly 0 when
    /// days_to_expiration <= 0.
    pub annualized_roi_pct: f64,
}

/// Midpoint of bid/ask when both sides carry a live quote, otherwise the last
/// traded price. A zero bid or ask counts as absent, so thinly traded
/// contracts fall back to the (possibly stale) last print.
#[inline]
pub fn premium(contract: &OptionContract) -> f64 {
    if contract.bid > 0.0 && contract.ask > 0.0 {
        (contract.bid + contract.ask) / 2.0
    } else {
        contract.last_price
    }
}

/// Pure function: the same contract and as-of date always produce the same
/// figures. Degenerate day counts are not rejected, they just annualize to 0.
pub fn compute(contract: &OptionContract, as_of: NaiveDate) -> RoiFigures {
    let premium = premium(contract);
    let days_to_expiration = (contract.expiration - as_of).num_days();
    let absolute_roi_pct = premium / contract.strike * 100.0;
    let annualized_roi_pct = if days_to_expiration > 0 {
        absolute_roi_pct / days_to_expiration as f64 * 365.0
    } else {
        0.0
    };

    RoiFigures {
        premium,
        days_to_expiration,
        absolute_roi_pct,
        annualized_roi_pct,
    }
}
