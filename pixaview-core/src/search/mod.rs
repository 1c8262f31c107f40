//! Domain search and regular/themed pairing.

mod provider;
mod service;

pub use provider::{ImagePairProvider, PairingProvider, pair_images};
pub use service::{ImageSearchService, SearchResult, SearchService};
