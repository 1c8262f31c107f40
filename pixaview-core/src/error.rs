//! Error types for the Pixaview core.
//!
//! Each layer owns its own enum. [`ApiError`] stays inside the api and search
//! modules; by the time a failure reaches the orchestrator it has been
//! translated into a [`SearchError`].

use pixaview_model::SearchError;
use thiserror::Error;

/// Failures of a single request against the image-search endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Failed to decode search response: {0}")]
    Decoding(#[source] serde_json::Error),
    #[error("Server responded with status {0}")]
    Server(u16),
    #[error("Unknown API error: {0}")]
    Unknown(String),
}

impl From<ApiError> for SearchError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Network(_) => SearchError::Network,
            ApiError::Server(status) => SearchError::Server(status),
            ApiError::InvalidUrl(_) | ApiError::Decoding(_) | ApiError::Unknown(_) => {
                SearchError::Unknown
            }
        }
    }
}

/// Failures while fetching image bytes for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageLoadError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Image request timed out")]
    Timeout,
    #[error("Image server responded with status {0}")]
    Status(u16),
    #[error("Payload is not a supported image format")]
    Decode,
}

/// Invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing API key")]
    MissingApiKey,
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("Page size {0} is outside the supported range 3..=200")]
    PageSize(u32),
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Errors raised while wiring the search stack together.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// A specialized `Result` type for stack construction.
pub type Result<T> = std::result::Result<T, CoreError>;
