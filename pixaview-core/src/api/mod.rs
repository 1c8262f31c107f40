//! Thin client for the image-search HTTP endpoint.

mod client;
mod types;

pub use client::{ApiClient, SearchApi};
pub use types::{ApiEnvelope, ApiHit};
