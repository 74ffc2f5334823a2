use super::roi;
use super::select;
use super::types::{EpsTrend, Fundamentals, ScreeningRow, Strategy, TickerSnapshot};
use crate::provider::MarketDataProvider;
use crate::state::ScreenCounters;
use chrono::NaiveDate;
use portable_atomic::Ordering::Relaxed;

/// Inputs for one screening run. Expirations are precomputed by the caller
/// (see `expirations::weekly_expirations`) so the engine itself stays free of
/// clock access.
#[derive(Debug, Clone)]
pub struct ScreenParams {
    pub tickers: Vec<String>,
    pub strategy: Strategy,
    pub moneyness_pct: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub expirations: Vec<NaiveDate>,
    pub as_of: NaiveDate,
}

/// Screen the ticker universe and return rows sorted descending by
/// annualized ROI.
///
/// Failure policy: a price fetch failure or an out-of-band price skips the
/// whole ticker; a chain fetch failure, empty chain, or moneyness no-match
/// skips that expiration only; a fundamentals fetch failure degrades to
/// sentinel values but the ticker's rows are still produced. No provider
/// error escapes -- a fully unreachable provider yields an empty vec.
///
/// Tickers are processed sequentially and rows depend only on provider data,
/// so the output is independent of processing order up to the final sort.
pub async fn screen(
    provider: &dyn MarketDataProvider,
    params: &ScreenParams,
    counters: &ScreenCounters,
) -> Vec<ScreeningRow> {
    let mut rows: Vec<ScreeningRow> = Vec::new();

    for ticker in &params.tickers {
        counters.tickers_screened.fetch_add(1, Relaxed);

        let snapshot = match fetch_snapshot(provider, ticker, counters).await {
            Some(s) => s,
            None => {
                counters.tickers_skipped.fetch_add(1, Relaxed);
                continue;
            }
        };

        if snapshot.price < params.min_price || snapshot.price > params.max_price {
            tracing::debug!(
                ticker = %ticker,
                price = snapshot.price,
                "price outside band, skipping ticker"
            );
            counters.tickers_skipped.fetch_add(1, Relaxed);
            continue;
        }

        for &expiration in &params.expirations {
            let chain = match provider
                .option_chain(ticker, expiration, params.strategy)
                .await
            {
                Ok(chain) => chain,
                Err(e) => {
                    tracing::debug!(
                        ticker = %ticker,
                        expiration = %expiration,
                        error = %e,
                        "chain fetch failed, skipping expiration"
                    );
                    counters.provider_errors.fetch_add(1, Relaxed);
                    continue;
                }
            };
            counters.chains_fetched.fetch_add(1, Relaxed);

            if chain.is_empty() {
                continue;
            }

            let Some(contract) =
                select::select_contract(&chain, params.strategy, snapshot.price, params.moneyness_pct)
            else {
                continue;
            };

            let figures = roi::compute(&contract, params.as_of);
            rows.push(build_row(&snapshot, params.strategy, expiration, &figures, contract.strike));
            counters.rows_produced.fetch_add(1, Relaxed);
        }
    }

    rows.sort_by(|a, b| {
        b.annualized_roi_pct
            .partial_cmp(&a.annualized_roi_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    tracing::info!(
        tickers = params.tickers.len(),
        expirations = params.expirations.len(),
        rows = rows.len(),
        strategy = %params.strategy,
        "screen complete"
    );

    rows
}

/// Price is load-bearing; fundamentals degrade to sentinels on failure.
async fn fetch_snapshot(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    counters: &ScreenCounters,
) -> Option<TickerSnapshot> {
    let price = match provider.current_price(ticker).await {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(ticker = %ticker, error = %e, "price fetch failed, skipping ticker");
            counters.provider_errors.fetch_add(1, Relaxed);
            return None;
        }
    };

    let fundamentals = match provider.fundamentals(ticker).await {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(ticker = %ticker, error = %e, "fundamentals unavailable, using sentinels");
            counters.provider_errors.fetch_add(1, Relaxed);
            Fundamentals::default()
        }
    };

    Some(TickerSnapshot {
        symbol: ticker.to_string(),
        price,
        fundamentals,
    })
}

fn build_row(
    snapshot: &TickerSnapshot,
    strategy: Strategy,
    expiration: NaiveDate,
    figures: &roi::RoiFigures,
    strike: f64,
) -> ScreeningRow {
    let f = &snapshot.fundamentals;
    ScreeningRow {
        ticker: snapshot.symbol.clone(),
        strategy,
        current_price: snapshot.price,
        strike,
        target_price: f.target_price,
        premium: figures.premium,
        days_to_expiration: figures.days_to_expiration,
        expiration,
        annualized_roi_pct: figures.annualized_roi_pct,
        absolute_roi_pct: figures.absolute_roi_pct,
        dividend_yield_pct: f.dividend_yield * 100.0,
        next_earnings: f.next_earnings.clone(),
        recommendation: f.recommendation.clone(),
        eps_ttm: f.trailing_eps,
        eps_trend: EpsTrend::from_growth(f.earnings_growth),
        recommendation_score: f.recommendation_score,
        sector: f.sector.clone(),
        industry: f.industry.clone(),
    }
}
