use bytes::Bytes;
use moka::future::Cache;
use url::Url;

use crate::config::CacheConfig;

/// Snapshot of cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: u64,
    pub weighted_bytes: u64,
}

/// In-memory image cache keyed by absolute URL.
///
/// Capacity is expressed in bytes. Every entry weighs at least
/// `max_bytes / max_entries`, so the byte budget also caps the entry count.
#[derive(Clone)]
pub struct ImageCache {
    inner: Cache<String, Bytes>,
    config: CacheConfig,
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("entries", &self.inner.entry_count())
            .field("weighted_bytes", &self.inner.weighted_size())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl ImageCache {
    pub fn new(config: CacheConfig) -> Self {
        let floor = config.max_bytes / config.max_entries.max(1);
        let inner = Cache::builder()
            .max_capacity(config.max_bytes)
            .weigher(move |_key: &String, value: &Bytes| -> u32 {
                let weight = (value.len() as u64).max(floor);
                u32::try_from(weight).unwrap_or(u32::MAX)
            })
            .build();

        Self { inner, config }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    pub async fn save(&self, url: &Url, bytes: Bytes) {
        self.inner.insert(url.as_str().to_owned(), bytes).await;
    }

    pub async fn get(&self, url: &Url) -> Option<Bytes> {
        self.inner.get(url.as_str()).await
    }

    /// Drops every entry. Called on memory pressure.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks().await;
        CacheStats {
            entries: self.inner.entry_count(),
            weighted_bytes: self.inner.weighted_size(),
        }
    }
}
