//! Search pipeline for the Pixaview image search client.
//!
//! A query typed by the user flows through four layers:
//!
//! 1. [`api`] issues one HTTP request per page against the search endpoint.
//! 2. [`search`] turns responses into domain results and runs the regular
//!    and themed searches side by side, pairing their hits by position.
//! 3. [`loading`] debounces text input, tracks pagination, accumulates
//!    pages and publishes a [`SearchState`](pixaview_model::SearchState)
//!    for every transition.
//! 4. [`view_model`] adapts the orchestrator for a screen.
//!
//! [`SearchStack::build`] wires all of it from a [`SearchConfig`].
#![allow(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod image;
pub mod loading;
pub mod localization;
pub mod navigation;
pub mod preview;
pub mod search;
pub mod stack;
pub mod view_model;

pub use config::{CacheConfig, SearchConfig};
pub use error::{ApiError, ConfigError, CoreError, ImageLoadError};
pub use loading::{ImageLoadingService, PaginationCursor, SearchStateStore, StateSubscription};
pub use localization::{BundledLocalizer, LocalizationKey, Localizer};
pub use navigation::Navigator;
pub use preview::{ImagePreviewModel, PreviewState};
pub use search::{ImagePairProvider, ImageSearchService, PairingProvider, SearchService};
pub use stack::SearchStack;
pub use view_model::SearchViewModel;

pub use pixaview_model as model;
