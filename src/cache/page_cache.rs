use redis::{aio::ConnectionManager, AsyncCommands};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::metrics::PAGE_CACHE_EVENTS;

const KEY_PREFIX: &str = "pages:index";

/// Page cache for the rendered home feed.
///
/// Stores the response bytes keyed by the requested page number. Within the
/// TTL, repeated requests are served these exact bytes regardless of writes
/// underneath; staleness up to the TTL is a deliberate trade-off. The cache
/// expires naturally or is cleared explicitly via [`PageCache::clear`].
#[derive(Clone)]
pub struct PageCache {
    redis: ConnectionManager,
    ttl: Duration,
}

impl PageCache {
    pub fn new(redis: ConnectionManager, ttl_secs: u64) -> Self {
        Self {
            redis,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    fn page_key(page: i64) -> String {
        format!("{}:{}", KEY_PREFIX, page)
    }

    /// Cached bytes for a page, if present and unexpired.
    pub async fn get(&self, page: i64) -> Result<Option<String>> {
        let key = Self::page_key(page);
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(body)) => {
                debug!(page, "page cache HIT");
                PAGE_CACHE_EVENTS.with_label_values(&["hit"]).inc();
                Ok(Some(body))
            }
            Ok(None) => {
                debug!(page, "page cache MISS");
                PAGE_CACHE_EVENTS.with_label_values(&["miss"]).inc();
                Ok(None)
            }
            Err(e) => {
                warn!(page, "page cache read failed: {}", e);
                PAGE_CACHE_EVENTS.with_label_values(&["error"]).inc();
                Err(AppError::Cache(e.to_string()))
            }
        }
    }

    /// Store the rendered page for the configured TTL.
    pub async fn put(&self, page: i64, body: &str) -> Result<()> {
        let key = Self::page_key(page);
        let mut conn = self.redis.clone();

        conn.set_ex::<_, _, ()>(&key, body, self.ttl.as_secs())
            .await
            .map_err(|e| {
                warn!(page, "page cache write failed: {}", e);
                PAGE_CACHE_EVENTS.with_label_values(&["error"]).inc();
                AppError::Cache(e.to_string())
            })?;

        debug!(page, ttl_secs = self.ttl.as_secs(), "page cache WRITE");
        Ok(())
    }

    /// Remove every cached home-feed page; returns the number removed.
    pub async fn clear(&self) -> Result<u64> {
        let mut conn = self.redis.clone();
        let pattern = format!("{}:*", KEY_PREFIX);

        let keys: Vec<String> = {
            let mut iter = conn.scan_match::<_, String>(&pattern).await?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };

        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.redis.clone();
        let removed: u64 = conn.del(&keys).await?;
        debug!(removed, "page cache CLEAR");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_format() {
        assert_eq!(PageCache::page_key(1), "pages:index:1");
        assert_eq!(PageCache::page_key(42), "pages:index:42");
    }
}
