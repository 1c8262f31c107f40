use crate::error::SearchError;

/// Search status published to the UI.
///
/// Exactly one state is current at any time. States are pushed to observers
/// in the order they happen; a `Loading` is always followed by the matching
/// `Loaded`, `NoResults` or `Error` for the same fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// No committed query.
    #[default]
    Empty,
    /// A page fetch is in flight.
    Loading { first_page: bool },
    /// A page fetch completed and the accumulated results are up to date.
    Loaded { first_page: bool },
    /// The first page of the committed query came back empty.
    NoResults,
    /// The last fetch failed; earlier results are still available.
    Error(SearchError),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    pub fn error(&self) -> Option<&SearchError> {
        match self {
            SearchState::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchState::Empty => "Empty",
            SearchState::Loading { .. } => "Loading",
            SearchState::Loaded { .. } => "Loaded",
            SearchState::NoResults => "NoResults",
            SearchState::Error(_) => "Error",
        }
    }
}
