//! Search stack configuration.
//!
//! The core never reads the environment; callers build a [`SearchConfig`]
//! (directly, or by deserializing a file) and pass it to
//! [`SearchStack::build`](crate::SearchStack::build).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_THEMED_MODIFIER: &str = "graffiti";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(700);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(15);

const MIN_PAGE_SIZE: u32 = 3;
const MAX_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the image-search endpoint.
    pub endpoint: String,
    /// Access key sent as the `key` query parameter.
    pub api_key: String,
    /// Images requested per page, for both the regular and themed search.
    pub page_size: u32,
    /// Word appended to the query for the themed search.
    pub themed_modifier: String,
    /// Quiescent interval before typed text is committed as a search.
    #[serde(rename = "debounce_ms", with = "millis")]
    pub debounce: Duration,
    /// Timeout applied to every search request.
    #[serde(rename = "request_timeout_ms", with = "millis")]
    pub request_timeout: Duration,
    /// Timeout applied to every image download.
    #[serde(rename = "image_timeout_ms", with = "millis")]
    pub image_timeout: Duration,
    pub cache: CacheConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            themed_modifier: DEFAULT_THEMED_MODIFIER.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            image_timeout: DEFAULT_IMAGE_TIMEOUT,
            cache: CacheConfig::default(),
        }
    }
}

impl SearchConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_themed_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.themed_modifier = modifier.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Checks every value the stack depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let endpoint = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ConfigError::PageSize(self.page_size));
        }

        if self.themed_modifier.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "themed modifier must not be blank".to_string(),
            ));
        }

        if self.request_timeout.is_zero() || self.image_timeout.is_zero() {
            return Err(ConfigError::Invalid("timeouts must be non-zero".to_string()));
        }

        self.cache.validate()
    }
}

/// Limits for the in-memory image cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: u64,
    pub max_bytes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            max_bytes: 50 * 1024 * 1024,
        }
    }
}

impl CacheConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 || self.max_bytes == 0 {
            return Err(ConfigError::Invalid(
                "cache limits must be non-zero".to_string(),
            ));
        }
        if self.max_bytes < self.max_entries {
            return Err(ConfigError::Invalid(format!(
                "cache byte limit {} is smaller than entry limit {}",
                self.max_bytes, self.max_entries
            )));
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_only_a_key() {
        assert_eq!(SearchConfig::default().validate(), Err(ConfigError::MissingApiKey));
        assert_eq!(SearchConfig::new("secret").validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_page_size_and_bad_endpoint() {
        let config = SearchConfig::new("secret").with_page_size(500);
        assert_eq!(config.validate(), Err(ConfigError::PageSize(500)));

        let config = SearchConfig::new("secret").with_endpoint("ftp://pixabay.com/api/");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));

        let config = SearchConfig::new("secret").with_endpoint("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn cache_limits_are_checked() {
        let config = SearchConfig::new("secret").with_cache(CacheConfig {
            max_entries: 100,
            max_bytes: 10,
        });
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn deserializes_partial_file_with_millisecond_durations() {
        let config: SearchConfig = serde_json::from_str(
            r#"{ "api_key": "k", "debounce_ms": 250, "cache": { "max_entries": 8 } }"#,
        )
        .unwrap();

        assert_eq!(config.api_key, "k");
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.cache.max_entries, 8);
        assert_eq!(config.cache.max_bytes, CacheConfig::default().max_bytes);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
