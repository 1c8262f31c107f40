//! State behind the full-size preview screen.

use std::sync::Arc;

use bytes::Bytes;
use pixaview_model::{ImagePair, ImageSlot, RawImage};
use tokio::sync::watch;
use tracing::debug;
use url::Url;

use crate::image::ImageLoader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    Loading,
    Loaded(Bytes),
    Failure,
}

/// One pair, the selected half, and the load state of its full-size image.
#[derive(Debug)]
pub struct ImagePreviewModel {
    pair: ImagePair,
    slot: ImageSlot,
    loader: Arc<dyn ImageLoader>,
    state: watch::Sender<PreviewState>,
}

impl ImagePreviewModel {
    /// `selected_index` is clamped to the primary image when the pair has no
    /// themed variant.
    pub fn new(pair: ImagePair, selected_index: usize, loader: Arc<dyn ImageLoader>) -> Self {
        let slot = ImageSlot::resolve(&pair, selected_index);
        let (state, _) = watch::channel(PreviewState::Loading);
        Self {
            pair,
            slot,
            loader,
            state,
        }
    }

    pub fn pair(&self) -> &ImagePair {
        &self.pair
    }

    pub fn slot(&self) -> ImageSlot {
        self.slot
    }

    pub fn has_themed(&self) -> bool {
        self.pair.has_themed()
    }

    pub fn current_image(&self) -> &RawImage {
        self.pair.image_at(self.slot).unwrap_or(&self.pair.primary)
    }

    pub fn current_tags(&self) -> &str {
        &self.current_image().tags
    }

    pub fn current_full_size_url(&self) -> &Url {
        &self.current_image().full_size_url
    }

    pub fn state(&self) -> PreviewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.state.subscribe()
    }

    /// Loads the full-size image of the selected half.
    pub async fn load_current(&self) -> PreviewState {
        self.state.send_replace(PreviewState::Loading);

        let url = self.current_full_size_url().clone();
        let state = match self.loader.load(&url).await {
            Ok(bytes) => PreviewState::Loaded(bytes),
            Err(error) => {
                debug!(target: "preview", %url, %error, "preview load failed");
                PreviewState::Failure
            }
        };

        self.state.send_replace(state.clone());
        state
    }

    /// Toggles between the primary and themed image and reloads. Returns
    /// `None` without doing anything when the pair has no themed image.
    pub async fn switch_image(&mut self) -> Option<PreviewState> {
        if !self.has_themed() {
            return None;
        }
        self.slot = self.slot.toggled();
        Some(self.load_current().await)
    }
}
