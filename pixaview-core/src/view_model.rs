//! Presentation adapter over the orchestrator.

use std::sync::Arc;

use pixaview_model::{DisplayPair, ImagePair, ImageSlot, SearchState};
use tracing::debug;

use crate::loading::{ImageLoadingService, PaginationCursor, StateSubscription};
use crate::localization::{LocalizationKey, Localizer};
use crate::navigation::Navigator;

/// What a search screen binds to. Holds no state of its own; everything is
/// read from the [`ImageLoadingService`].
#[derive(Debug)]
pub struct SearchViewModel {
    loading: ImageLoadingService,
    navigator: Arc<dyn Navigator>,
    localizer: Arc<dyn Localizer>,
}

impl SearchViewModel {
    /// Binds a running orchestrator to a screen.
    pub fn new(
        loading: ImageLoadingService,
        navigator: Arc<dyn Navigator>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            loading,
            navigator,
            localizer,
        }
    }

    pub fn state(&self) -> SearchState {
        self.loading.state()
    }

    /// See [`ImageLoadingService::subscribe`].
    pub fn subscribe(&self) -> StateSubscription {
        self.loading.subscribe()
    }

    /// Loaded results projected for rendering.
    pub fn pairs(&self) -> Vec<DisplayPair> {
        self.loading
            .image_pairs()
            .iter()
            .map(DisplayPair::from)
            .collect()
    }

    pub fn image_pairs(&self) -> Vec<ImagePair> {
        self.loading.image_pairs()
    }

    pub fn pagination(&self) -> PaginationCursor {
        self.loading.pagination()
    }

    pub fn localize(&self, key: LocalizationKey) -> String {
        self.localizer.lookup(key)
    }

    /// Informational or error text for the current state, if it has one.
    pub fn status_message(&self) -> Option<String> {
        self.message_for(&self.state())
    }

    pub fn message_for(&self, state: &SearchState) -> Option<String> {
        let key = match state {
            SearchState::Empty => LocalizationKey::SearchEmptyState,
            SearchState::NoResults => LocalizationKey::SearchNoResults,
            SearchState::Error(error) => LocalizationKey::for_error(error),
            SearchState::Loading { .. } | SearchState::Loaded { .. } => return None,
        };
        Some(self.localizer.lookup(key))
    }

    pub fn text_changed(&self, text: impl Into<String>) {
        self.loading.update_search_text(text);
    }

    pub fn submit(&self, text: impl Into<String>) {
        self.loading.search_now(text);
    }

    pub fn scrolled_near_end(&self) {
        self.loading.load_more();
    }

    /// Opens the preview for the pair at `index`. Returns `false` when the
    /// index is out of range.
    pub fn item_selected(&self, index: usize, slot: ImageSlot) -> bool {
        let Some(pair) = self.loading.pair_at(index) else {
            debug!(target: "view_model", index, "selection out of range");
            return false;
        };
        let selected = ImageSlot::resolve(&pair, slot.index()).index();
        self.navigator.show_preview(pair, selected);
        true
    }
}
