//! Result types for similar-item ranking and prompt search.

use crate::content::ContentItem;
use serde::{Deserialize, Serialize};

/// Grid cell height hint for a masonry layout. Derived from rank position only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutSize {
    Standard,
    Tall,
}

impl LayoutSize {
    /// Hint for position `index` in a similar-items list: every third slot of
    /// the first eight, then every seventh slot after the eighth.
    pub fn for_similar(index: usize) -> Self {
        if (index < 8 && index % 3 == 0) || (index > 8 && index % 7 == 0) {
            LayoutSize::Tall
        } else {
            LayoutSize::Standard
        }
    }

    /// Hint for position `index` in a gallery listing or search result grid:
    /// every other fourth slot (0, 8, 16, ...).
    pub fn for_listing(index: usize) -> Self {
        if index % 4 == 0 && (index / 4) % 2 == 0 {
            LayoutSize::Tall
        } else {
            LayoutSize::Standard
        }
    }
}

/// A candidate that passed the similarity threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub item: ContentItem,
    /// Rounded to one decimal; always above the minimum threshold.
    pub score: f64,
    pub layout: LayoutSize,
}

/// A prompt search match.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub item: ContentItem,
    pub relevance: u32,
    pub layout: LayoutSize,
}
