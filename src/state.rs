use crate::config::AppConfig;
use crate::provider::MarketDataProvider;
use portable_atomic::AtomicU64;
use std::sync::Arc;

/// Lock-free run counters, exposed at /api/counters.
#[derive(Debug, Default)]
pub struct ScreenCounters {
    pub screens_run: AtomicU64,
    pub tickers_screened: AtomicU64,
    pub tickers_skipped: AtomicU64,
    pub chains_fetched: AtomicU64,
    pub provider_errors: AtomicU64,
    pub rows_produced: AtomicU64,
}

/// Shared application state handed to the axum handlers.
pub struct AppState {
    pub config: AppConfig,
    pub provider: Arc<dyn MarketDataProvider>,
    pub counters: ScreenCounters,
}

impl AppState {
    pub fn new(config: AppConfig, provider: Arc<dyn MarketDataProvider>) -> Arc<Self> {
        Arc::new(Self {
            config,
            provider,
            counters: ScreenCounters::default(),
        })
    }
}
