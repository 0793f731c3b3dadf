use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::AsyncCommands;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Content-addressed cache key: `summ:<sha256-hex-of-text>`.
pub fn cache_key(text: &str) -> String {
    format!("summ:{:x}", Sha256::digest(text.as_bytes()))
}

/// Shared summary cache.
///
/// Both operations are infallible from the caller's perspective: backend
/// failures are logged by the implementation and degrade to cache misses /
/// dropped writes. There is no single-flight guarantee — concurrent
/// requests over identical uncached text may both compute; last writer
/// wins and both results should be equal.
#[async_trait]
pub trait SummaryCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str, ttl: Duration);
}

/// Redis-backed cache over a multiplexed connection.
pub struct RedisCache {
    conn: redis::aio::MultiplexedConnection,
    warned: AtomicBool,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(RedisCache {
            conn,
            warned: AtomicBool::new(false),
        })
    }

    fn warn_once(&self, op: &str, err: &redis::RedisError) {
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!(op, error = %err, "summary cache unavailable, degrading to recompute");
        }
    }
}

#[async_trait]
impl SummaryCache for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => value,
            Err(e) => {
                self.warn_once("get", &e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn
            .set_ex::<_, _, ()>(key, value, ttl.as_secs())
            .await
        {
            self.warn_once("set", &e);
        }
    }
}

/// In-process TTL cache for single-instance deployments and tests.
#[derive(Default)]
pub struct MemoryCache {
    entries: tokio::sync::Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        MemoryCache::default()
    }
}

#[async_trait]
impl SummaryCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, expires)) if *expires > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
    }
}

/// Used when no cache backend is reachable: every lookup misses, every
/// write is dropped. The service keeps working, summaries are simply
/// always recomputed.
pub struct NoopCache;

#[async_trait]
impl SummaryCache for NoopCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, key: &str, _value: &str, _ttl: Duration) {
        debug!(key, "no-op cache, write dropped");
    }
}
