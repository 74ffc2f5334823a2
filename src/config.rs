use crate::errors::{ScreenerError, ScreenerResult};
use chrono::Weekday;

/// Default screening universe: large caps with liquid weekly options plus
/// the two index ETFs. Extendable via SCREENER_EXTRA_TICKERS.
const DEFAULT_UNIVERSE: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "AMZN", "GOOG", "META", "TSLA", "RIVN", "WSM", "CRM", "SOUN", "LEN",
    "TGT", "PLTR", "VZ", "BABA", "FIVE", "ULTA", "WMT", "ELF", "LLY", "JD", "POWL", "NVO", "LULU",
    "MRVL", "SNOW", "MDB", "SOFI", "IBIT", "SMCI", "AMD", "MU", "SPY", "QQQ",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub yahoo_base_url: String,
    pub universe: Vec<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub moneyness_pct: f64,
    pub expiration_count: usize,
    pub expiration_weekday: Weekday,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> ScreenerResult<Self> {
        dotenvy::dotenv().ok();

        let min_price = env_var_or("SCREENER_MIN_PRICE", "20.0")
            .parse::<f64>()
            .map_err(|e| ScreenerError::Config(format!("SCREENER_MIN_PRICE: {e}")))?;

        let max_price = env_var_or("SCREENER_MAX_PRICE", "500.0")
            .parse::<f64>()
            .map_err(|e| ScreenerError::Config(format!("SCREENER_MAX_PRICE: {e}")))?;

        let moneyness_pct = env_var_or("SCREENER_MONEYNESS_PCT", "10.0")
            .parse::<f64>()
            .map_err(|e| ScreenerError::Config(format!("SCREENER_MONEYNESS_PCT: {e}")))?;

        let expiration_count = env_var_or("SCREENER_EXPIRATION_COUNT", "8")
            .parse::<usize>()
            .map_err(|e| ScreenerError::Config(format!("SCREENER_EXPIRATION_COUNT: {e}")))?;

        let expiration_weekday = env_var_or("SCREENER_EXPIRATION_WEEKDAY", "fri")
            .parse::<Weekday>()
            .map_err(|_| ScreenerError::Config("SCREENER_EXPIRATION_WEEKDAY: invalid weekday".into()))?;

        let cache_ttl_secs = env_var_or("SCREENER_CACHE_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| ScreenerError::Config(format!("SCREENER_CACHE_TTL_SECS: {e}")))?;

        let request_timeout_secs = env_var_or("SCREENER_REQUEST_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| ScreenerError::Config(format!("SCREENER_REQUEST_TIMEOUT_SECS: {e}")))?;

        let server_port = env_var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ScreenerError::Config(format!("SERVER_PORT: {e}")))?;

        if max_price < min_price {
            return Err(ScreenerError::Config(format!(
                "price band inverted: min {min_price} > max {max_price}"
            )));
        }

        Ok(Self {
            yahoo_base_url: env_var_or("YAHOO_BASE_URL", "https://query2.finance.yahoo.com"),
            universe: build_universe(&env_var_or("SCREENER_EXTRA_TICKERS", "")),
            min_price,
            max_price,
            moneyness_pct,
            expiration_count,
            expiration_weekday,
            cache_ttl_secs,
            request_timeout_secs,
            server_port,
        })
    }
}

/// Default universe plus any comma-separated extras, uppercased, deduplicated
/// and sorted.
pub fn build_universe(extra: &str) -> Vec<String> {
    let mut universe: Vec<String> = DEFAULT_UNIVERSE.iter().map(|s| s.to_string()).collect();
    universe.extend(
        extra
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty()),
    );
    universe.sort();
    universe.dedup();
    universe
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_dedup_and_case() {
        let universe = build_universe(" nke , aapl,NKE,");
        assert_eq!(universe.iter().filter(|t| *t == "NKE").count(), 1);
        assert_eq!(universe.iter().filter(|t| *t == "AAPL").count(), 1);
        assert!(universe.windows(2).all(|w| w[0] < w[1]), "sorted and unique");
    }

    #[test]
    fn test_universe_default_untouched() {
        let universe = build_universe("");
        assert_eq!(universe.len(), DEFAULT_UNIVERSE.len());
        assert!(universe.contains(&"SPY".to_string()));
    }
}
