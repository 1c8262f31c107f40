//! Wires the search pipeline from a [`SearchConfig`].

use std::sync::Arc;

use pixaview_model::ImagePair;
use reqwest::Client;
use tracing::info;

use crate::api::ApiClient;
use crate::config::SearchConfig;
use crate::error::{CoreError, Result};
use crate::image::{HttpImageLoader, ImageCache, ImageLoader};
use crate::loading::ImageLoadingService;
use crate::localization::{BundledLocalizer, Localizer};
use crate::navigation::Navigator;
use crate::preview::ImagePreviewModel;
use crate::search::{ImagePairProvider, ImageSearchService, PairingProvider};
use crate::view_model::SearchViewModel;

/// Every long-lived collaborator, constructed once and shared.
#[derive(Debug, Clone)]
pub struct SearchStack {
    pub config: SearchConfig,
    pub provider: Arc<dyn PairingProvider>,
    pub image_loader: Arc<dyn ImageLoader>,
    pub cache: ImageCache,
    pub localizer: Arc<dyn Localizer>,
}

impl SearchStack {
    pub fn build(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(CoreError::HttpClient)?;

        let api = Arc::new(ApiClient::with_client(
            client.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
        ));
        let service = Arc::new(ImageSearchService::new(api, config.themed_modifier.clone()));
        let provider = Arc::new(ImagePairProvider::new(service, config.page_size));

        let cache = ImageCache::new(config.cache);
        let image_loader = Arc::new(HttpImageLoader::new(
            client,
            cache.clone(),
            config.image_timeout,
        ));

        info!(
            target: "stack",
            endpoint = %config.endpoint,
            page_size = config.page_size,
            "search stack ready"
        );

        Ok(Self {
            config,
            provider,
            image_loader,
            cache,
            localizer: Arc::new(BundledLocalizer::english()),
        })
    }

    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    /// Starts an orchestrator. Must be called inside a tokio runtime.
    pub fn loading_service(&self) -> ImageLoadingService {
        ImageLoadingService::spawn(self.provider.clone(), self.config.debounce)
    }

    pub fn view_model(&self, navigator: Arc<dyn Navigator>) -> SearchViewModel {
        SearchViewModel::new(self.loading_service(), navigator, self.localizer.clone())
    }

    pub fn preview(&self, pair: ImagePair, selected_index: usize) -> ImagePreviewModel {
        ImagePreviewModel::new(pair, selected_index, self.image_loader.clone())
    }
}
