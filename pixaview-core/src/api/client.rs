use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::types::ApiEnvelope;
use crate::error::ApiError;

/// One page of raw search results.
#[async_trait]
pub trait SearchApi: Send + Sync + fmt::Debug {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ApiEnvelope, ApiError>;
}

/// reqwest-backed [`SearchApi`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint)
            .field("has_key", &!self.api_key.is_empty())
            .finish()
    }
}

impl ApiClient {
    /// Builds a client with a fixed per-request timeout.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint, api_key))
    }

    /// Wraps an existing client, sharing its connection pool.
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn request_url(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Url, ApiError> {
        let page = page.to_string();
        let per_page = page_size.to_string();
        let url = Url::parse_with_params(
            &self.endpoint,
            [
                ("key", self.api_key.as_str()),
                ("q", query),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ],
        )
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.endpoint)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                self.endpoint,
                url.scheme()
            )));
        }
        Ok(url)
    }
}

fn classify(error: reqwest::Error) -> ApiError {
    if error.is_builder() {
        ApiError::Unknown(error.to_string())
    } else {
        ApiError::Network(error)
    }
}

#[async_trait]
impl SearchApi for ApiClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ApiEnvelope, ApiError> {
        let url = self.request_url(query, page, page_size)?;

        debug!(
            target: "api::search",
            query,
            page,
            page_size,
            "sending search request"
        );

        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                target: "api::search",
                query,
                page,
                status = status.as_u16(),
                "search request rejected"
            );
            return Err(ApiError::Server(status.as_u16()));
        }

        let body = response.bytes().await.map_err(classify)?;
        let envelope: ApiEnvelope =
            serde_json::from_slice(&body).map_err(ApiError::Decoding)?;

        debug!(
            target: "api::search",
            query,
            page,
            hits = envelope.hits.len(),
            total_hits = envelope.total_hits,
            "search response decoded"
        );
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> ApiClient {
        ApiClient::with_client(Client::new(), endpoint, "top-secret")
    }

    #[test]
    fn request_url_carries_all_parameters() {
        let url = client("https://pixabay.com/api/")
            .request_url("red cars", 3, 10)
            .unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(url.path(), "/api/");
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "top-secret".to_string()),
                ("q".to_string(), "red cars".to_string()),
                ("page".to_string(), "3".to_string()),
                ("per_page".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn bad_endpoints_are_invalid_urls() {
        assert!(matches!(
            client("::nope").request_url("a", 1, 10),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            client("ftp://example.com/api/").request_url("a", 1, 10),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let rendered = format!("{:?}", client("https://pixabay.com/api/"));
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("has_key: true"));
    }
}
