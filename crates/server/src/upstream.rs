//! Upstream listing source.
//!
//! Fetches `{base}/api/images/` and `{base}/api/videos/` and merges unseen
//! records into the local gallery. A failed fetch leaves the pool untouched.

use crate::api::metrics;
use ainura_core::config;
use ainura_core::content::{ListingFile, ListingRecord};
use ainura_core::{ContentKind, Gallery};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("listing has no '{0}' key")]
    MissingKey(&'static str),
}

/// HTTP client bound to one upstream base URL.
#[derive(Debug, Clone)]
pub struct Upstream {
    base_url: String,
    client: reqwest::Client,
}

impl Upstream {
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config::UPSTREAM_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the listing for `kind`.
    ///
    /// A JSON object without the `images`/`videos` key for `kind` is an
    /// error, so an error body served with 200 is not taken as an empty listing.
    pub async fn fetch_listing(
        &self,
        kind: ContentKind,
    ) -> Result<Vec<ListingRecord>, UpstreamError> {
        let url = format!("{}/api/{}/", self.base_url, kind.plural());
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(UpstreamError::Status(resp.status().as_u16()));
        }
        let listing: ListingFile = resp.json().await?;
        if !listing.holds(kind) {
            return Err(UpstreamError::MissingKey(kind.plural()));
        }
        Ok(listing.into_records(kind))
    }

    /// Fetches both listings and merges them into `gallery`.
    /// Returns the number of new items added.
    pub async fn refresh(&self, gallery: &Gallery) -> usize {
        let mut added = 0;
        for kind in ContentKind::ALL {
            match self.fetch_listing(kind).await {
                Ok(records) => {
                    let fetched = records.len();
                    let merged = gallery.merge_listing(kind, records);
                    if merged > 0 {
                        metrics::record_write_operation(kind.as_str(), "merge");
                    }
                    tracing::info!(%kind, fetched, merged, "Merged upstream listing");
                    added += merged;
                }
                Err(e) => {
                    tracing::warn!(%kind, "Upstream fetch from {} failed: {}", self.base_url, e);
                }
            }
        }
        added
    }
}
