use std::collections::HashMap;
use std::env;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::Mutex;

pub const DEFAULT_TTL_SECS: u64 = 3600;

struct CacheEntry {
    stored_at: Instant,
    payload: Value,
}

/// Time-boxed cache for upstream JSON payloads. Entries expire after a fixed
/// TTL; expired entries are dropped on read. Fallback payloads are never
/// stored here, so an upstream outage is retried on the next request.
pub struct UpstreamCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl UpstreamCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// TTL from UPSTREAM_CACHE_TTL_SECS, defaulting to one hour.
    pub fn from_env() -> Self {
        let secs = env::var("UPSTREAM_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECS);
        Self::new(Duration::from_secs(secs))
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn put(&self, key: &str, payload: Value) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                payload,
            },
        );
    }
}
