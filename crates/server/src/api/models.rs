//! Request and response data transfer objects for the REST API.
//!
//! All types derive `Serialize` and/or `Deserialize` for JSON marshalling via Axum.

use ainura_core::config;
use ainura_core::search::{LayoutSize, ScoredCandidate, SearchHit};
use ainura_core::{ContentItem, ContentKind};
use serde::{Deserialize, Serialize};

/// One item as returned by listing, lookup, similar, and search routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub prompt: String,
    pub author: String,
    pub likes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Grid layout hint; absent on single-item lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<LayoutSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<u32>,
}

impl From<ContentItem> for ItemResponse {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id,
            kind: item.kind,
            prompt: item.description,
            author: item.author,
            likes: item.popularity,
            url: item.url,
            thumbnail: item.thumbnail,
            size: None,
            score: None,
            relevance: None,
        }
    }
}

impl From<ScoredCandidate> for ItemResponse {
    fn from(candidate: ScoredCandidate) -> Self {
        Self {
            size: Some(candidate.layout),
            score: Some(candidate.score),
            ..candidate.item.into()
        }
    }
}

impl From<SearchHit> for ItemResponse {
    fn from(hit: SearchHit) -> Self {
        Self {
            size: Some(hit.layout),
            relevance: Some(hit.relevance),
            ..hit.item.into()
        }
    }
}

/// Query parameters for paged routes.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl PageQuery {
    /// Returns `(offset, limit)` with defaults applied, or an error message
    /// when either exceeds its maximum.
    pub fn resolve(&self) -> Result<(usize, usize), String> {
        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(config::DEFAULT_PAGE_SIZE);
        if offset > config::MAX_OFFSET {
            return Err(format!("offset must be at most {}", config::MAX_OFFSET));
        }
        if limit == 0 || limit > config::MAX_PAGE_SIZE {
            return Err(format!("limit must be 1-{}", config::MAX_PAGE_SIZE));
        }
        Ok((offset, limit))
    }
}

/// Query parameters for `GET /search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    /// `all`, `image(s)`, or `video(s)`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sort: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn page(&self) -> PageQuery {
        PageQuery {
            offset: self.offset,
            limit: self.limit,
        }
    }
}

/// Request body for `POST /items/:kind`.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub id: Option<u64>,
    pub prompt: String,
    #[serde(default)]
    pub author: String,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
}

/// Response for `GET /items/:kind`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<ItemResponse>,
    pub count: usize,
    pub total: usize,
}

/// Response for `GET /items/:kind/:id/similar`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarResponse {
    pub reference: ItemResponse,
    pub results: Vec<ItemResponse>,
    pub count: usize,
    pub total: usize,
}

/// Response for `GET /search`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ItemResponse>,
    pub count: usize,
    pub total: usize,
}

/// Response for like / unlike.
#[derive(Debug, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub likes: u64,
}

/// Response for `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub images: usize,
    pub videos: usize,
    pub upstream: Option<String>,
}

/// Generic message response.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
