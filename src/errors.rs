/// Domain-specific error types for the screener.
/// Provider failures never halt a screening run: the engine absorbs them at
/// the smallest scope (per ticker or per expiration) and drops the row.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("yahoo API error: {status} {body}")]
    YahooApi { status: u16, body: String },

    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ScreenerError {
    fn from(e: reqwest::Error) -> Self {
        ScreenerError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ScreenerError {
    fn from(e: serde_json::Error) -> Self {
        ScreenerError::Parse(e.to_string())
    }
}

pub type ScreenerResult<T> = Result<T, ScreenerError>;
