use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use pixaview_model::{ImagePair, RawImage, SearchError};
use tracing::{debug, warn};

use super::service::SearchService;

/// Produces one page of regular/themed pairs.
#[async_trait]
pub trait PairingProvider: Send + Sync + fmt::Debug {
    async fn search(&self, query: &str, page: u32) -> Result<Vec<ImagePair>, SearchError>;
}

/// Runs the regular and themed searches side by side and zips the results.
#[derive(Debug, Clone)]
pub struct ImagePairProvider {
    service: Arc<dyn SearchService>,
    page_size: u32,
}

impl ImagePairProvider {
    pub fn new(service: Arc<dyn SearchService>, page_size: u32) -> Self {
        Self { service, page_size }
    }
}

#[async_trait]
impl PairingProvider for ImagePairProvider {
    async fn search(&self, query: &str, page: u32) -> Result<Vec<ImagePair>, SearchError> {
        let (primary, themed) = tokio::join!(
            self.service.search(query, page, self.page_size),
            self.service.search_themed(query, page, self.page_size),
        );

        let primary = primary?.images;
        let themed = match themed {
            Ok(result) => result.images,
            Err(SearchError::NoResults) => Vec::new(),
            Err(error) => {
                warn!(
                    target: "search::provider",
                    query,
                    page,
                    error = %error,
                    "themed search failed, continuing without themed images"
                );
                Vec::new()
            }
        };

        let pairs = pair_images(primary, themed);
        debug!(
            target: "search::provider",
            query,
            page,
            pairs = pairs.len(),
            themed = pairs.iter().filter(|pair| pair.has_themed()).count(),
            "page paired"
        );
        Ok(pairs)
    }
}

/// Positional zip: every primary image gets the themed image at the same
/// index, if there is one. Extra themed images are dropped.
pub fn pair_images(primary: Vec<RawImage>, themed: Vec<RawImage>) -> Vec<ImagePair> {
    let mut themed = themed.into_iter();
    primary
        .into_iter()
        .map(|image| ImagePair::new(image, themed.next()))
        .collect()
}
