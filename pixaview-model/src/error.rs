use thiserror::Error;

/// Domain-level search failures.
///
/// These are the only errors the presentation layer ever sees. Transport and
/// decoding problems are folded into one of these variants by the search
/// service before they leave the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchError {
    #[error("Invalid search query")]
    InvalidQuery,
    #[error("Network error. Check your internet connection")]
    Network,
    #[error("Server error ({0}). Please try again later")]
    Server(u16),
    #[error("Nothing matched your search")]
    NoResults,
    #[error("An unknown error occurred")]
    Unknown,
}
