use serde::{Deserialize, Serialize};

/// Top-level body returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub total: u64,
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
    #[serde(default)]
    pub hits: Vec<ApiHit>,
}

/// One image hit. URLs are kept as strings; the search service decides
/// what to do with ones that do not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHit {
    pub id: u64,
    #[serde(default)]
    pub tags: String,
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
}
