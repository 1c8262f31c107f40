//! Debounced search commits and page-by-page result accumulation.

mod debounce;
mod pagination;
mod service;
mod store;

pub use debounce::Debouncer;
pub use pagination::PaginationCursor;
pub use service::ImageLoadingService;
pub use store::{SearchStateStore, StateSubscription};
