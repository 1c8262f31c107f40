//! Image bytes for thumbnails and previews.
//!
//! Loading is cache-first: the in-memory [`ImageCache`] is consulted before
//! any request, and only payloads that look like a real image are cached.

mod cache;
mod loader;

pub use cache::{CacheStats, ImageCache};
pub use loader::{HttpImageLoader, ImageLoader, LoadIndicator};
