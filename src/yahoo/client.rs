use super::types::*;
use crate::errors::{ScreenerError, ScreenerResult};
use crate::provider::MarketDataProvider;
use crate::screener::types::{Fundamentals, OptionContract, Strategy};
use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;

const QUOTE_SUMMARY_MODULES: &str =
    "financialData,summaryDetail,defaultKeyStatistics,calendarEvents,assetProfile";

/// Yahoo Finance REST client (v7 options, v10 quoteSummary). All methods
/// return Result, never panic. The request timeout bounds every provider
/// call the engine makes.
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .pool_max_idle_per_host(4)
                .user_agent("Mozilla/5.0 (X11; Linux x86_64) wheel_screener/0.1")
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ScreenerResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ScreenerError::YahooApi {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ScreenerError::Parse(format!("GET {path}: {e}")))
    }

    /// Chain envelope for one ticker; `expiration` of None returns the
    /// nearest slice, which still carries the underlying quote.
    async fn fetch_chain(
        &self,
        ticker: &str,
        expiration: Option<NaiveDate>,
    ) -> ScreenerResult<ChainResult> {
        let mut parts: smallvec::SmallVec<[String; 2]> = smallvec::SmallVec::new();
        if let Some(date) = expiration {
            parts.push(format!("date={}", expiration_epoch(date)));
        }
        let query = if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        };

        let envelope: OptionChainEnvelope = self
            .get_json(&format!("/v7/finance/options/{ticker}{query}"))
            .await?;

        envelope
            .option_chain
            .and_then(|body| body.result)
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| {
                ScreenerError::DataUnavailable(format!("{ticker}: empty option chain response"))
            })
    }
}

/// Yahoo keys option expirations by the Unix timestamp of midnight UTC.
#[inline]
fn expiration_epoch(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooClient {
    async fn current_price(&self, ticker: &str) -> ScreenerResult<f64> {
        let chain = self.fetch_chain(ticker, None).await?;
        let price = chain
            .quote
            .and_then(|q| q.regular_market_price)
            .ok_or_else(|| {
                ScreenerError::DataUnavailable(format!("{ticker}: no regular market price"))
            })?;

        if price <= 0.0 || !price.is_finite() {
            return Err(ScreenerError::DataUnavailable(format!(
                "{ticker}: invalid price {price}"
            )));
        }
        Ok(price)
    }

    async fn option_chain(
        &self,
        ticker: &str,
        expiration: NaiveDate,
        strategy: Strategy,
    ) -> ScreenerResult<Vec<OptionContract>> {
        let result = self.fetch_chain(ticker, Some(expiration)).await?;

        let slice = result.options.unwrap_or_default().into_iter().next();
        let quotes = match (slice, strategy) {
            (Some(s), Strategy::CashSecuredPut) => s.puts.unwrap_or_default(),
            (Some(s), Strategy::CoveredCall) => s.calls.unwrap_or_default(),
            (None, _) => Vec::new(),
        };

        let mut contracts: Vec<OptionContract> = quotes
            .iter()
            .filter_map(|q| q.to_contract(expiration))
            .collect();

        // Yahoo already returns strikes ascending; enforce the canonical
        // order so downstream never depends on upstream behavior.
        contracts.sort_by(|a, b| {
            a.strike
                .partial_cmp(&b.strike)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(contracts)
    }

    async fn fundamentals(&self, ticker: &str) -> ScreenerResult<Fundamentals> {
        let envelope: QuoteSummaryEnvelope = self
            .get_json(&format!(
                "/v10/finance/quoteSummary/{ticker}?modules={QUOTE_SUMMARY_MODULES}"
            ))
            .await?;

        let result = envelope
            .quote_summary
            .and_then(|body| body.result)
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| {
                ScreenerError::DataUnavailable(format!("{ticker}: empty quoteSummary response"))
            })?;

        Ok(result.to_fundamentals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration_epoch_midnight_utc() {
        // 2026-09-18T00:00:00Z
        let date = NaiveDate::from_ymd_opt(2026, 9, 18).unwrap();
        assert_eq!(expiration_epoch(date), 1789689600);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = YahooClient::new("https://query2.finance.yahoo.com/", 5);
        assert_eq!(client.base_url, "https://query2.finance.yahoo.com");
    }
}
