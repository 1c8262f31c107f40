//! UI-facing projections of [`RawImage`] and [`ImagePair`].
//!
//! Views diff lists of these to decide which cells to rebuild, so equality and
//! hashing look only at the URL pair. Two projections of the same hit compare
//! equal even when the provider changed its tags between pages.

use std::hash::{Hash, Hasher};

use url::Url;

use crate::image::{ImagePair, RawImage};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayImage {
    pub tags: String,
    pub thumbnail_url: Url,
    pub full_size_url: Url,
}

impl PartialEq for DisplayImage {
    fn eq(&self, other: &Self) -> bool {
        self.thumbnail_url == other.thumbnail_url
            && self.full_size_url == other.full_size_url
    }
}

impl Eq for DisplayImage {}

impl Hash for DisplayImage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.thumbnail_url.hash(state);
        self.full_size_url.hash(state);
    }
}

impl From<&RawImage> for DisplayImage {
    fn from(image: &RawImage) -> Self {
        Self {
            tags: image.tags.clone(),
            thumbnail_url: image.thumbnail_url.clone(),
            full_size_url: image.full_size_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayPair {
    pub primary: DisplayImage,
    pub themed: Option<DisplayImage>,
}

impl From<&ImagePair> for DisplayPair {
    fn from(pair: &ImagePair) -> Self {
        Self {
            primary: DisplayImage::from(&pair.primary),
            themed: pair.themed.as_ref().map(DisplayImage::from),
        }
    }
}
