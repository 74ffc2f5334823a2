use crate::screener::types::{Fundamentals, OptionContract};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Shared ──

/// Yahoo wraps most numeric fields as `{ "raw": 1.23, "fmt": "1.23" }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFmt {
    pub raw: Option<f64>,
    pub fmt: Option<String>,
}

impl RawFmt {
    #[inline]
    pub fn raw_or_zero(&self) -> f64 {
        self.raw.unwrap_or(0.0)
    }
}

#[inline]
fn raw_of(field: &Option<RawFmt>) -> f64 {
    field.as_ref().map(RawFmt::raw_or_zero).unwrap_or(0.0)
}

// ── v7 option chain ──

#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainEnvelope {
    #[serde(rename = "optionChain")]
    pub option_chain: Option<OptionChainBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainBody {
    pub result: Option<Vec<ChainResult>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResult {
    pub underlying_symbol: Option<String>,
    pub expiration_dates: Option<Vec<i64>>,
    pub quote: Option<UnderlyingQuote>,
    pub options: Option<Vec<OptionSlice>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderlyingQuote {
    pub symbol: Option<String>,
    pub regular_market_price: Option<f64>,
}

/// One expiration's worth of contracts, both sides.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSlice {
    pub expiration_date: Option<i64>,
    pub calls: Option<Vec<OptionQuote>>,
    pub puts: Option<Vec<OptionQuote>>,
}

/// One listed contract as Yahoo reports it. Bid/ask/lastPrice are plain
/// numbers and are omitted entirely for strikes that never traded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionQuote {
    pub contract_symbol: Option<String>,
    pub strike: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub last_price: Option<f64>,
    pub volume: Option<i64>,
    pub open_interest: Option<i64>,
    pub in_the_money: Option<bool>,
}

impl OptionQuote {
    /// Domain contract for this quote; None when the strike is missing or
    /// non-positive (nothing to sell against). Absent quote fields map to 0.0,
    /// which downstream treats as "no live quote".
    pub fn to_contract(&self, expiration: NaiveDate) -> Option<OptionContract> {
        let strike = self.strike.filter(|s| *s > 0.0)?;
        Some(OptionContract {
            strike,
            bid: self.bid.unwrap_or(0.0),
            ask: self.ask.unwrap_or(0.0),
            last_price: self.last_price.unwrap_or(0.0),
            expiration,
        })
    }
}

// ── v10 quoteSummary ──

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: Option<QuoteSummaryBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryBody {
    pub result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    pub financial_data: Option<FinancialData>,
    pub summary_detail: Option<SummaryDetail>,
    pub default_key_statistics: Option<DefaultKeyStatistics>,
    pub calendar_events: Option<CalendarEvents>,
    pub asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub target_mean_price: Option<RawFmt>,
    pub recommendation_mean: Option<RawFmt>,
    pub recommendation_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetail {
    pub dividend_yield: Option<RawFmt>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultKeyStatistics {
    pub trailing_eps: Option<RawFmt>,
    pub earnings_quarterly_growth: Option<RawFmt>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvents {
    pub earnings: Option<EarningsCalendar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsCalendar {
    pub earnings_date: Option<Vec<RawFmt>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProfile {
    pub sector: Option<String>,
    pub industry: Option<String>,
}

impl QuoteSummaryResult {
    /// Flatten the module soup into the domain fundamentals bag. Any missing
    /// module or field degrades to the sentinel, never to an error.
    pub fn to_fundamentals(&self) -> Fundamentals {
        let fin = self.financial_data.as_ref();
        let stats = self.default_key_statistics.as_ref();
        let profile = self.asset_profile.as_ref();

        let next_earnings = self
            .calendar_events
            .as_ref()
            .and_then(|c| c.earnings.as_ref())
            .and_then(|e| e.earnings_date.as_ref())
            .and_then(|dates| dates.first())
            .and_then(|d| d.fmt.clone())
            .unwrap_or_else(|| "N/A".to_string());

        Fundamentals {
            target_price: raw_of(&fin.and_then(|f| f.target_mean_price.clone())),
            dividend_yield: raw_of(
                &self
                    .summary_detail
                    .as_ref()
                    .and_then(|s| s.dividend_yield.clone()),
            ),
            next_earnings,
            recommendation: fin
                .and_then(|f| f.recommendation_key.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            recommendation_score: raw_of(&fin.and_then(|f| f.recommendation_mean.clone())),
            trailing_eps: raw_of(&stats.and_then(|s| s.trailing_eps.clone())),
            earnings_growth: raw_of(&stats.and_then(|s| s.earnings_quarterly_growth.clone())),
            sector: profile
                .and_then(|p| p.sector.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            industry: profile
                .and_then(|p| p.industry.clone())
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}
