use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Small TTL map behind a plain mutex. Critical sections are a single lookup
/// or insert; the lock is never held across an await point.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a clone of the cached value if it is still fresh. Expired
    /// entries are evicted on the way out.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some((inserted, value)) if inserted.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: K, value: V) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, (Instant::now(), value));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_hits() {
        let cache: TtlCache<String, f64> = TtlCache::new(Duration::from_secs(60));
        cache.insert("AAPL".to_string(), 231.5);
        assert_eq!(cache.get(&"AAPL".to_string()), Some(231.5));
        assert_eq!(cache.get(&"MSFT".to_string()), None);
    }

    #[test]
    fn test_expired_entry_evicted() {
        let cache: TtlCache<u32, &'static str> = TtlCache::new(Duration::ZERO);
        cache.insert(1, "stale");
        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty(), "expired entry should be removed on read");
    }

    #[test]
    fn test_insert_overwrites() {
        let cache: TtlCache<u32, f64> = TtlCache::new(Duration::from_secs(60));
        cache.insert(7, 1.0);
        cache.insert(7, 2.0);
        assert_eq!(cache.get(&7), Some(2.0));
        assert_eq!(cache.len(), 1);
    }
}
