use std::hash::{Hash, Hasher};

use url::Url;

/// A single image hit as accepted by the domain layer.
///
/// Both URLs have already been parsed, so anything holding a `RawImage` can
/// hand them straight to an image loader. Identity is defined by the URL
/// pair; `id` and `tags` are informational.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawImage {
    /// Provider-assigned identifier.
    pub id: u64,
    /// Comma-separated tag list exactly as the provider sent it.
    pub tags: String,
    /// Medium-sized preview used for grid thumbnails.
    pub thumbnail_url: Url,
    /// Large rendition used by the preview screen.
    pub full_size_url: Url,
}

impl RawImage {
    pub fn new(
        id: u64,
        tags: impl Into<String>,
        thumbnail_url: Url,
        full_size_url: Url,
    ) -> Self {
        Self {
            id,
            tags: tags.into(),
            thumbnail_url,
            full_size_url,
        }
    }

    /// Individual tags with surrounding whitespace removed.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

impl PartialEq for RawImage {
    fn eq(&self, other: &Self) -> bool {
        self.thumbnail_url == other.thumbnail_url
            && self.full_size_url == other.full_size_url
    }
}

impl Eq for RawImage {}

impl Hash for RawImage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.thumbnail_url.hash(state);
        self.full_size_url.hash(state);
    }
}

/// One grid row: a regular image and, when available, the themed variant
/// found at the same position of the themed search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImagePair {
    pub primary: RawImage,
    pub themed: Option<RawImage>,
}

impl ImagePair {
    pub fn new(primary: RawImage, themed: Option<RawImage>) -> Self {
        Self { primary, themed }
    }

    pub fn has_themed(&self) -> bool {
        self.themed.is_some()
    }

    pub fn image_at(&self, slot: ImageSlot) -> Option<&RawImage> {
        match slot {
            ImageSlot::Primary => Some(&self.primary),
            ImageSlot::Themed => self.themed.as_ref(),
        }
    }
}

/// Which half of an [`ImagePair`] is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageSlot {
    #[default]
    Primary,
    Themed,
}

impl ImageSlot {
    /// Positional index used by navigation (`0` primary, `1` themed).
    pub fn index(self) -> usize {
        match self {
            ImageSlot::Primary => 0,
            ImageSlot::Themed => 1,
        }
    }

    /// Maps a navigation index onto a slot that actually exists in `pair`.
    ///
    /// Anything other than `1` selects the primary image, and `1` falls back
    /// to the primary image when the pair has no themed variant.
    pub fn resolve(pair: &ImagePair, index: usize) -> Self {
        if index == 1 && pair.has_themed() {
            ImageSlot::Themed
        } else {
            ImageSlot::Primary
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ImageSlot::Primary => ImageSlot::Themed,
            ImageSlot::Themed => ImageSlot::Primary,
        }
    }
}
