//! Kind filters and sort orders for prompt search.

use crate::content::ContentKind;
use crate::error::GalleryError;
use crate::search::types::SearchHit;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::str::FromStr;

/// Restricts prompt search to one partition, or searches both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(ContentKind),
}

impl KindFilter {
    pub fn matches(self, kind: ContentKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(k) => k == kind,
        }
    }
}

impl FromStr for KindFilter {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(KindFilter::All)
        } else {
            s.parse().map(KindFilter::Only)
        }
    }
}

/// Ordering applied to prompt search hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Highest relevance first.
    #[default]
    Relevance,
    /// Most liked first.
    Likes,
    /// Highest id first.
    Newest,
    /// Lowest id first.
    Oldest,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Likes => "likes",
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }

    /// Sorts in place. All orders are stable.
    pub fn apply(self, hits: &mut [SearchHit]) {
        match self {
            SortOrder::Relevance => hits.sort_by_key(|h| Reverse(h.relevance)),
            SortOrder::Likes => hits.sort_by_key(|h| Reverse(h.item.popularity)),
            SortOrder::Newest => hits.sort_by_key(|h| Reverse(h.item.id)),
            SortOrder::Oldest => hits.sort_by_key(|h| h.item.id),
        }
    }
}

impl FromStr for SortOrder {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortOrder::Relevance),
            "likes" => Ok(SortOrder::Likes),
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(GalleryError::Invalid(format!("unknown sort order '{other}'"))),
        }
    }
}
