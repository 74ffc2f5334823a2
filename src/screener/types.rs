use crate::errors::ScreenerError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Strategy ──

/// Which side of the options wheel is being screened. Determines the filter
/// direction and which end of the filtered chain gets picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "Cash Secured Put")]
    CashSecuredPut,
    #[serde(rename = "Covered Call")]
    CoveredCall,
}

impl Strategy {
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CashSecuredPut => "Cash Secured Put",
            Self::CoveredCall => "Covered Call",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Strategy {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "put" | "puts" | "csp" | "cash secured put" | "cashsecuredput" => {
                Ok(Self::CashSecuredPut)
            }
            "call" | "calls" | "cc" | "covered call" | "coveredcall" => Ok(Self::CoveredCall),
            other => Err(ScreenerError::Config(format!("unknown strategy: {other}"))),
        }
    }
}

// ── Contracts ──

/// One listed contract for a single expiration. Bid, ask and last price may
/// legitimately be 0.0, which the premium logic treats as "no live quote".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub strike: f64,
    pub bid: f64,
    pub ask: f64,
    pub last_price: f64,
    pub expiration: NaiveDate,
}

// ── Fundamentals ──

/// Company fundamentals merged into every row for a ticker. Every field is
/// optional upstream; missing values fall back to the sentinels below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub target_price: f64,
    /// Dividend yield as a fraction (0.013 = 1.3%).
    pub dividend_yield: f64,
    pub next_earnings: String,
    pub recommendation: String,
    pub recommendation_score: f64,
    pub trailing_eps: f64,
    /// Quarterly earnings growth, sign-significant.
    pub earnings_growth: f64,
    pub sector: String,
    pub industry: String,
}

impl Default for Fundamentals {
    fn default() -> Self {
        Self {
            target_price: 0.0,
            dividend_yield: 0.0,
            next_earnings: "N/A".to_string(),
            recommendation: "N/A".to_string(),
            recommendation_score: 0.0,
            trailing_eps: 0.0,
            earnings_growth: 0.0,
            sector: "N/A".to_string(),
            industry: "N/A".to_string(),
        }
    }
}

/// Point-in-time view of one ticker: spot price plus fundamentals.
#[derive(Debug, Clone)]
pub struct TickerSnapshot {
    pub symbol: String,
    pub price: f64,
    pub fundamentals: Fundamentals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpsTrend {
    Beat,
    Miss,
}

impl EpsTrend {
    /// Beat iff quarterly earnings growth is strictly positive.
    #[inline]
    pub fn from_growth(earnings_growth: f64) -> Self {
        if earnings_growth > 0.0 {
            Self::Beat
        } else {
            Self::Miss
        }
    }
}

// ── Output rows ──

/// One screened opportunity: a single selected contract for one ticker and
/// expiration. ROI fields are derived from premium, strike and days to
/// expiration; recomputing from the stored fields reproduces them.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningRow {
    pub ticker: String,
    pub strategy: Strategy,
    pub current_price: f64,
    pub strike: f64,
    pub target_price: f64,
    pub premium: f64,
    pub days_to_expiration: i64,
    pub expiration: NaiveDate,
    pub annualized_roi_pct: f64,
    pub absolute_roi_pct: f64,
    pub dividend_yield_pct: f64,
    pub next_earnings: String,
    pub recommendation: String,
    pub eps_ttm: f64,
    pub eps_trend: EpsTrend,
    pub recommendation_score: f64,
    pub sector: String,
    pub industry: String,
}
