//! User-facing strings.

use std::collections::HashMap;
use std::fmt;

use pixaview_model::SearchError;

/// Every string the client shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalizationKey {
    CommonOk,
    CommonCancel,
    CommonError,
    CommonRetry,
    CommonLoading,
    SearchTitle,
    SearchPlaceholder,
    SearchEmptyState,
    SearchNoResults,
    PreviewTitle,
    PreviewImageInfo,
    PreviewTags,
    ErrorNetwork,
    ErrorServer,
    ErrorGeneral,
    ErrorImageLoad,
    ErrorInvalidQuery,
}

impl LocalizationKey {
    pub const ALL: [LocalizationKey; 17] = [
        LocalizationKey::CommonOk,
        LocalizationKey::CommonCancel,
        LocalizationKey::CommonError,
        LocalizationKey::CommonRetry,
        LocalizationKey::CommonLoading,
        LocalizationKey::SearchTitle,
        LocalizationKey::SearchPlaceholder,
        LocalizationKey::SearchEmptyState,
        LocalizationKey::SearchNoResults,
        LocalizationKey::PreviewTitle,
        LocalizationKey::PreviewImageInfo,
        LocalizationKey::PreviewTags,
        LocalizationKey::ErrorNetwork,
        LocalizationKey::ErrorServer,
        LocalizationKey::ErrorGeneral,
        LocalizationKey::ErrorImageLoad,
        LocalizationKey::ErrorInvalidQuery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LocalizationKey::CommonOk => "common.ok",
            LocalizationKey::CommonCancel => "common.cancel",
            LocalizationKey::CommonError => "common.error",
            LocalizationKey::CommonRetry => "common.retry",
            LocalizationKey::CommonLoading => "common.loading",
            LocalizationKey::SearchTitle => "search.title",
            LocalizationKey::SearchPlaceholder => "search.placeholder",
            LocalizationKey::SearchEmptyState => "search.empty_state",
            LocalizationKey::SearchNoResults => "search.no_results",
            LocalizationKey::PreviewTitle => "image_preview.title",
            LocalizationKey::PreviewImageInfo => "image_preview.image_info",
            LocalizationKey::PreviewTags => "image_preview.tags",
            LocalizationKey::ErrorNetwork => "errors.network_error",
            LocalizationKey::ErrorServer => "errors.server_error",
            LocalizationKey::ErrorGeneral => "errors.general_error",
            LocalizationKey::ErrorImageLoad => "errors.image_load_error",
            LocalizationKey::ErrorInvalidQuery => "errors.invalid_query",
        }
    }

    /// Message shown for a failed or empty search.
    pub fn for_error(error: &SearchError) -> Self {
        match error {
            SearchError::InvalidQuery => LocalizationKey::ErrorInvalidQuery,
            SearchError::Network => LocalizationKey::ErrorNetwork,
            SearchError::Server(_) => LocalizationKey::ErrorServer,
            SearchError::NoResults => LocalizationKey::SearchNoResults,
            SearchError::Unknown => LocalizationKey::ErrorGeneral,
        }
    }

    fn english(self) -> &'static str {
        match self {
            LocalizationKey::CommonOk => "OK",
            LocalizationKey::CommonCancel => "Cancel",
            LocalizationKey::CommonError => "Error",
            LocalizationKey::CommonRetry => "Retry",
            LocalizationKey::CommonLoading => "Loading...",
            LocalizationKey::SearchTitle => "Image Search",
            LocalizationKey::SearchPlaceholder => "Search images",
            LocalizationKey::SearchEmptyState => "Type something to start searching",
            LocalizationKey::SearchNoResults => "No images found",
            LocalizationKey::PreviewTitle => "Preview",
            LocalizationKey::PreviewImageInfo => "Image info",
            LocalizationKey::PreviewTags => "Tags",
            LocalizationKey::ErrorNetwork => "Network error. Check your internet connection",
            LocalizationKey::ErrorServer => "Server error. Please try again later",
            LocalizationKey::ErrorGeneral => "Something went wrong",
            LocalizationKey::ErrorImageLoad => "Failed to load image",
            LocalizationKey::ErrorInvalidQuery => "Invalid search query",
        }
    }
}

impl fmt::Display for LocalizationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Localizer: Send + Sync + fmt::Debug {
    fn lookup(&self, key: LocalizationKey) -> String;
}

/// String table keyed by dotted key name. Missing keys render as the key
/// itself.
#[derive(Debug, Clone, Default)]
pub struct BundledLocalizer {
    table: HashMap<String, String>,
}

impl BundledLocalizer {
    /// Table containing the built-in English strings.
    pub fn english() -> Self {
        let table = LocalizationKey::ALL
            .iter()
            .map(|key| (key.as_str().to_string(), key.english().to_string()))
            .collect();
        Self { table }
    }

    /// Merges a flat JSON object (`{"search.title": "..."}`) over the
    /// current table.
    pub fn with_overrides_json(mut self, json: &str) -> Result<Self, serde_json::Error> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        self.table.extend(overrides);
        Ok(self)
    }
}

impl Localizer for BundledLocalizer {
    fn lookup(&self, key: LocalizationKey) -> String {
        self.table
            .get(key.as_str())
            .cloned()
            .unwrap_or_else(|| key.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn english_table_covers_every_key() {
        let localizer = BundledLocalizer::english();
        for key in LocalizationKey::ALL {
            assert_ne!(localizer.lookup(key), key.as_str(), "{key} is missing");
        }
        let names: HashSet<_> = LocalizationKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), LocalizationKey::ALL.len());
    }

    #[test]
    fn overrides_replace_entries_and_missing_keys_fall_back() {
        let localizer = BundledLocalizer::english()
            .with_overrides_json(r#"{"search.no_results": "Nichts gefunden"}"#)
            .unwrap();
        assert_eq!(localizer.lookup(LocalizationKey::SearchNoResults), "Nichts gefunden");
        assert_eq!(localizer.lookup(LocalizationKey::CommonOk), "OK");

        let empty = BundledLocalizer::default();
        assert_eq!(empty.lookup(LocalizationKey::ErrorServer), "errors.server_error");

        assert!(BundledLocalizer::english().with_overrides_json("[1]").is_err());
    }

    #[test]
    fn errors_map_to_messages() {
        assert_eq!(
            LocalizationKey::for_error(&SearchError::Server(500)),
            LocalizationKey::ErrorServer
        );
        assert_eq!(
            LocalizationKey::for_error(&SearchError::Unknown),
            LocalizationKey::ErrorGeneral
        );
    }
}
