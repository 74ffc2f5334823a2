use crate::cache::TtlCache;
use crate::errors::ScreenerResult;
use crate::screener::types::{Fundamentals, OptionContract, Strategy};
use chrono::NaiveDate;
use std::time::Duration;

/// Market data the engine consumes. Implementations own timeout and retry
/// policy; the engine only ever sees success or a `ScreenerError` and treats
/// any failure as "skip this unit of work".
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn current_price(&self, ticker: &str) -> ScreenerResult<f64>;

    /// Contracts for one ticker and expiration, one side of the chain only
    /// (puts for cash-secured puts, calls for covered calls), ascending by
    /// strike. May be empty.
    async fn option_chain(
        &self,
        ticker: &str,
        expiration: NaiveDate,
        strategy: Strategy,
    ) -> ScreenerResult<Vec<OptionContract>>;

    async fn fundamentals(&self, ticker: &str) -> ScreenerResult<Fundamentals>;
}

/// TTL-cached decorator over any provider. This replaces the original
/// screener's global memo cache with an explicit, injectable collaborator
/// keyed by ticker (price, fundamentals) and ticker+expiration+strategy
/// (chains). Only successes are cached; failures retry on the next call.
pub struct CachedProvider<P> {
    inner: P,
    prices: TtlCache<String, f64>,
    chains: TtlCache<(String, NaiveDate, Strategy), Vec<OptionContract>>,
    fundamentals: TtlCache<String, Fundamentals>,
}

impl<P> CachedProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            prices: TtlCache::new(ttl),
            chains: TtlCache::new(ttl),
            fundamentals: TtlCache::new(ttl),
        }
    }
}

#[async_trait::async_trait]
impl<P: MarketDataProvider> MarketDataProvider for CachedProvider<P> {
    async fn current_price(&self, ticker: &str) -> ScreenerResult<f64> {
        let key = ticker.to_string();
        if let Some(price) = self.prices.get(&key) {
            return Ok(price);
        }
        let price = self.inner.current_price(ticker).await?;
        self.prices.insert(key, price);
        Ok(price)
    }

    async fn option_chain(
        &self,
        ticker: &str,
        expiration: NaiveDate,
        strategy: Strategy,
    ) -> ScreenerResult<Vec<OptionContract>> {
        let key = (ticker.to_string(), expiration, strategy);
        if let Some(chain) = self.chains.get(&key) {
            return Ok(chain);
        }
        let chain = self.inner.option_chain(ticker, expiration, strategy).await?;
        self.chains.insert(key, chain.clone());
        Ok(chain)
    }

    async fn fundamentals(&self, ticker: &str) -> ScreenerResult<Fundamentals> {
        let key = ticker.to_string();
        if let Some(fundamentals) = self.fundamentals.get(&key) {
            return Ok(fundamentals);
        }
        let fundamentals = self.inner.fundamentals(ticker).await?;
        self.fundamentals.insert(key, fundamentals.clone());
        Ok(fundamentals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ScreenerError;
    use portable_atomic::{AtomicU64, Ordering};

    /// Inner provider that counts calls and fails for unknown tickers.
    struct CountingProvider {
        calls: AtomicU64,
    }

    #[async_trait::async_trait]
    impl MarketDataProvider for CountingProvider {
        async fn current_price(&self, ticker: &str) -> ScreenerResult<f64> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if ticker == "AAPL" {
                Ok(231.5)
            } else {
                Err(ScreenerError::DataUnavailable(ticker.to_string()))
            }
        }

        async fn option_chain(
            &self,
            _ticker: &str,
            expiration: NaiveDate,
            _strategy: Strategy,
        ) -> ScreenerResult<Vec<OptionContract>> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(vec![OptionContract {
                strike: 90.0,
                bid: 1.0,
                ask: 1.2,
                last_price: 1.1,
                expiration,
            }])
        }

        async fn fundamentals(&self, _ticker: &str) -> ScreenerResult<Fundamentals> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(Fundamentals::default())
        }
    }

    fn cached(ttl: Duration) -> CachedProvider<CountingProvider> {
        CachedProvider::new(
            CountingProvider {
                calls: AtomicU64::new(0),
            },
            ttl,
        )
    }

    #[tokio::test]
    async fn test_second_read_served_from_cache() {
        let provider = cached(Duration::from_secs(60));
        let first = provider.current_price("AAPL").await.unwrap();
        let second = provider.current_price("AAPL").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.inner.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let provider = cached(Duration::from_secs(60));
        assert!(provider.current_price("ZZZZ").await.is_err());
        assert!(provider.current_price("ZZZZ").await.is_err());
        assert_eq!(provider.inner.calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_chain_key_includes_strategy() {
        let provider = cached(Duration::from_secs(60));
        let expiration = NaiveDate::from_ymd_opt(2026, 9, 18).unwrap();
        provider
            .option_chain("AAPL", expiration, Strategy::CashSecuredPut)
            .await
            .unwrap();
        provider
            .option_chain("AAPL", expiration, Strategy::CoveredCall)
            .await
            .unwrap();
        // Different strategies are distinct cache entries
        assert_eq!(provider.inner.calls.load(Ordering::Relaxed), 2);

        provider
            .option_chain("AAPL", expiration, Strategy::CoveredCall)
            .await
            .unwrap();
        assert_eq!(provider.inner.calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let provider = cached(Duration::ZERO);
        provider.current_price("AAPL").await.unwrap();
        provider.current_price("AAPL").await.unwrap();
        assert_eq!(provider.inner.calls.load(Ordering::Relaxed), 2);
    }
}
