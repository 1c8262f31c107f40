use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use pixaview_model::{RawImage, SearchError};
use tracing::{debug, warn};
use url::Url;

use crate::api::{ApiEnvelope, ApiHit, SearchApi};

/// One page of domain search results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub total: u64,
    pub total_hits: u64,
    pub images: Vec<RawImage>,
}

/// Regular and themed image search for one page.
#[async_trait]
pub trait SearchService: Send + Sync + fmt::Debug {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResult, SearchError>;

    /// Same as [`search`](Self::search) with the themed modifier appended.
    async fn search_themed(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResult, SearchError>;
}

#[derive(Debug, Clone)]
pub struct ImageSearchService {
    api: Arc<dyn SearchApi>,
    themed_modifier: String,
}

impl ImageSearchService {
    pub fn new(api: Arc<dyn SearchApi>, themed_modifier: impl Into<String>) -> Self {
        Self {
            api,
            themed_modifier: themed_modifier.into(),
        }
    }

    async fn run(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResult, SearchError> {
        let envelope = self
            .api
            .search(query, page, page_size)
            .await
            .map_err(|error| {
                warn!(
                    target: "search::service",
                    query,
                    page,
                    error = %error,
                    "search request failed"
                );
                SearchError::from(error)
            })?;

        if envelope.hits.is_empty() {
            debug!(target: "search::service", query, page, "no hits");
            return Err(SearchError::NoResults);
        }

        Ok(into_result(query, envelope))
    }
}

fn into_result(query: &str, envelope: ApiEnvelope) -> SearchResult {
    let images = envelope
        .hits
        .into_iter()
        .filter_map(|hit| into_image(query, hit))
        .collect();

    SearchResult {
        total: envelope.total,
        total_hits: envelope.total_hits,
        images,
    }
}

fn into_image(query: &str, hit: ApiHit) -> Option<RawImage> {
    let parsed = Url::parse(&hit.webformat_url)
        .and_then(|thumb| Url::parse(&hit.large_image_url).map(|full| (thumb, full)));

    match parsed {
        Ok((thumbnail_url, full_size_url)) => {
            Some(RawImage::new(hit.id, hit.tags, thumbnail_url, full_size_url))
        }
        Err(error) => {
            warn!(
                target: "search::service",
                query,
                id = hit.id,
                error = %error,
                "dropping hit with malformed URL"
            );
            None
        }
    }
}

#[async_trait]
impl SearchService for ImageSearchService {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResult, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }
        self.run(query, page, page_size).await
    }

    async fn search_themed(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResult, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }
        let themed = format!("{query} {}", self.themed_modifier);
        self.run(&themed, page, page_size).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use parking_lot::Mutex;

    #[derive(Debug, Default)]
    struct ScriptedApi {
        calls: Mutex<Vec<(String, u32, u32)>>,
        reply: Mutex<Option<Result<ApiEnvelope, ApiError>>>,
    }

    impl ScriptedApi {
        fn replying(reply: Result<ApiEnvelope, ApiError>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply: Mutex::new(Some(reply)),
            })
        }
    }

    #[async_trait]
    impl SearchApi for ScriptedApi {
        async fn search(
            &self,
            query: &str,
            page: u32,
            page_size: u32,
        ) -> Result<ApiEnvelope, ApiError> {
            self.calls.lock().push((query.to_string(), page, page_size));
            self.reply
                .lock()
                .take()
                .unwrap_or_else(|| Err(ApiError::Unknown("no scripted reply".into())))
        }
    }

    fn hit(id: u64, thumb: &str) -> ApiHit {
        ApiHit {
            id,
            tags: "a, b".to_string(),
            webformat_url: thumb.to_string(),
            large_image_url: format!("{thumb}?large"),
        }
    }

    fn envelope(hits: Vec<ApiHit>) -> ApiEnvelope {
        ApiEnvelope {
            total: 100,
            total_hits: hits.len() as u64,
            hits,
        }
    }

    #[tokio::test]
    async fn blank_query_never_reaches_the_api() {
        let api = ScriptedApi::replying(Ok(envelope(vec![])));
        let service = ImageSearchService::new(api.clone(), "graffiti");

        assert_eq!(service.search("   ", 1, 10).await, Err(SearchError::InvalidQuery));
        assert_eq!(service.search_themed("", 1, 10).await, Err(SearchError::InvalidQuery));
        assert!(api.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn themed_search_appends_modifier() {
        let api = ScriptedApi::replying(Ok(envelope(vec![hit(1, "https://cdn.example.com/1.jpg")])));
        let service = ImageSearchService::new(api.clone(), "graffiti");

        let result = service.search_themed(" cats ", 2, 10).await.unwrap();
        assert_eq!(result.images.len(), 1);
        assert_eq!(
            api.calls.lock().as_slice(),
            &[("cats graffiti".to_string(), 2, 10)]
        );
    }

    #[tokio::test]
    async fn empty_hits_become_no_results() {
        let api = ScriptedApi::replying(Ok(envelope(vec![])));
        let service = ImageSearchService::new(api, "graffiti");
        assert_eq!(service.search("zzzz", 1, 10).await, Err(SearchError::NoResults));
    }

    #[tokio::test]
    async fn api_errors_are_mapped() {
        let cases = [
            (ApiError::Server(503), SearchError::Server(503)),
            (ApiError::InvalidUrl("x".into()), SearchError::Unknown),
            (ApiError::Unknown("x".into()), SearchError::Unknown),
        ];
        for (api_error, expected) in cases {
            let service = ImageSearchService::new(ScriptedApi::replying(Err(api_error)), "g");
            assert_eq!(service.search("q", 1, 10).await, Err(expected));
        }

        let decode = serde_json::from_str::<ApiEnvelope>("{").unwrap_err();
        let service =
            ImageSearchService::new(ScriptedApi::replying(Err(ApiError::Decoding(decode))), "g");
        assert_eq!(service.search("q", 1, 10).await, Err(SearchError::Unknown));
    }

    #[tokio::test]
    async fn malformed_urls_are_dropped_individually() {
        let api = ScriptedApi::replying(Ok(envelope(vec![
            hit(1, "https://cdn.example.com/1.jpg"),
            hit(2, "not a url"),
            hit(3, "https://cdn.example.com/3.jpg"),
        ])));
        let service = ImageSearchService::new(api, "graffiti");

        let result = service.search("cats", 1, 10).await.unwrap();
        let ids: Vec<u64> = result.images.iter().map(|image| image.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(result.total, 100);
    }
}
