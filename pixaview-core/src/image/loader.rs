use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::cache::ImageCache;
use crate::error::ImageLoadError;

/// Spinner or progress hook driven by [`ImageLoader::load_into`].
pub trait LoadIndicator: Send + Sync {
    fn start(&self);
    fn stop(&self);
}

#[async_trait]
pub trait ImageLoader: Send + Sync + fmt::Debug {
    async fn load(&self, url: &Url) -> Result<Bytes, ImageLoadError>;

    /// Loads `url` for display. The indicator runs for the duration of the
    /// load and `placeholder` is returned if it fails.
    async fn load_into(
        &self,
        url: &Url,
        indicator: Option<&dyn LoadIndicator>,
        placeholder: &Bytes,
    ) -> Bytes {
        if let Some(indicator) = indicator {
            indicator.start();
        }
        let bytes = match self.load(url).await {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(target: "image::loader", %url, %error, "using placeholder");
                placeholder.clone()
            }
        };
        if let Some(indicator) = indicator {
            indicator.stop();
        }
        bytes
    }
}

/// Cache-first HTTP image loader.
#[derive(Debug, Clone)]
pub struct HttpImageLoader {
    client: Client,
    cache: ImageCache,
    timeout: Duration,
}

impl HttpImageLoader {
    pub fn new(client: Client, cache: ImageCache, timeout: Duration) -> Self {
        Self {
            client,
            cache,
            timeout,
        }
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    async fn fetch(&self, url: &Url) -> Result<Bytes, ImageLoadError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(classify)?;
        image::guess_format(&bytes).map_err(|_| ImageLoadError::Decode)?;
        Ok(bytes)
    }
}

fn classify(error: reqwest::Error) -> ImageLoadError {
    if error.is_timeout() {
        ImageLoadError::Timeout
    } else {
        ImageLoadError::Network(error.to_string())
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &Url) -> Result<Bytes, ImageLoadError> {
        if let Some(bytes) = self.cache.get(url).await {
            debug!(target: "image::loader", %url, "cache hit");
            return Ok(bytes);
        }

        match self.fetch(url).await {
            Ok(bytes) => {
                debug!(target: "image::loader", %url, size = bytes.len(), "image fetched");
                self.cache.save(url, bytes.clone()).await;
                Ok(bytes)
            }
            Err(error) => {
                warn!(target: "image::loader", %url, %error, "image load failed");
                Err(error)
            }
        }
    }
}
