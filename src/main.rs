mod cache;
mod config;
mod errors;
mod provider;
mod screener;
mod server;
mod state;
mod yahoo;

use crate::provider::{CachedProvider, MarketDataProvider};
use crate::state::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Structured logging to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("wheel screener starting");

    // Load config
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        universe = cfg.universe.len(),
        expirations = cfg.expiration_count,
        cache_ttl_secs = cfg.cache_ttl_secs,
        "config loaded"
    );

    // Yahoo client behind the TTL cache, shared by all requests
    let yahoo = yahoo::client::YahooClient::new(&cfg.yahoo_base_url, cfg.request_timeout_secs);
    let provider: Arc<dyn MarketDataProvider> = Arc::new(CachedProvider::new(
        yahoo,
        std::time::Duration::from_secs(cfg.cache_ttl_secs),
    ));

    let port = cfg.server_port;
    let app_state = AppState::new(cfg, provider);

    let app = axum::Router::new()
        .route("/api/screen", axum::routing::get(server::routes::screen))
        .route("/api/counters", axum::routing::get(server::routes::get_counters))
        .route("/api/health", axum::routing::get(server::routes::health))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(app_state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
