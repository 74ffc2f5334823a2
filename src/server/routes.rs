use crate::screener::engine::{self, ScreenParams};
use crate::screener::expirations::weekly_expirations;
use crate::screener::types::Strategy;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::Json;
use portable_atomic::Ordering::Relaxed;
use std::sync::Arc;

// Hard cap on expirations per request; half a year of weeklies.
const MAX_EXPIRATIONS: usize = 26;

#[derive(serde::Deserialize)]
pub struct ScreenQuery {
    /// "put" / "call" (and the long labels); defaults to cash-secured puts.
    pub strategy: Option<String>,
    /// Comma-separated override of the configured universe.
    pub tickers: Option<String>,
    pub moneyness: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub expirations: Option<usize>,
}

/// GET /api/screen -- run a point-in-time screen. Query params override the
/// configured defaults; the response is the sorted row table.
pub async fn screen(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ScreenQuery>,
) -> Json<serde_json::Value> {
    let strategy = match q.strategy.as_deref() {
        Some(raw) => match raw.parse::<Strategy>() {
            Ok(s) => s,
            Err(e) => return Json(serde_json::json!({ "error": e.to_string() })),
        },
        None => Strategy::CashSecuredPut,
    };

    let tickers = match q.tickers.as_deref() {
        Some(raw) => {
            let mut tickers: Vec<String> = raw
                .split(',')
                .map(|t| t.trim().to_uppercase())
                .filter(|t| !t.is_empty())
                .collect();
            tickers.sort();
            tickers.dedup();
            tickers
        }
        None => state.config.universe.clone(),
    };

    let today = chrono::Utc::now().date_naive();
    let count = q
        .expirations
        .unwrap_or(state.config.expiration_count)
        .min(MAX_EXPIRATIONS);

    let params = ScreenParams {
        tickers,
        strategy,
        moneyness_pct: q.moneyness.unwrap_or(state.config.moneyness_pct),
        min_price: q.min_price.unwrap_or(state.config.min_price),
        max_price: q.max_price.unwrap_or(state.config.max_price),
        expirations: weekly_expirations(count, state.config.expiration_weekday, today),
        as_of: today,
    };

    state.counters.screens_run.fetch_add(1, Relaxed);
    let rows = engine::screen(state.provider.as_ref(), &params, &state.counters).await;

    Json(serde_json::json!({
        "count": rows.len(),
        "rows": rows,
        "generated_at": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /api/counters -- run counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let c = &state.counters;
    Json(serde_json::json!({
        "screens_run": c.screens_run.load(Relaxed),
        "tickers_screened": c.tickers_screened.load(Relaxed),
        "tickers_skipped": c.tickers_skipped.load(Relaxed),
        "chains_fetched": c.chains_fetched.load(Relaxed),
        "provider_errors": c.provider_errors.load(Relaxed),
        "rows_produced": c.rows_produced.load(Relaxed),
    }))
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
