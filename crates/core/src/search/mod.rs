//! Ranking entry points: similar items, prompt search, and result shaping.
//!
//! These functions take a pool slice and return freshly built result lists.
//! Nothing is cached between calls; identical inputs give identical output.

/// Kind filters and sort orders for prompt search.
pub mod filter;
/// Keyword search over prompts with term-based relevance.
pub mod prompt;
/// "Find similar" ranking over a content pool.
pub mod similar;
/// Result types and layout size hints.
pub mod types;

pub use filter::{KindFilter, SortOrder};
pub use prompt::{search_prompts, PromptQuery};
pub use similar::{find_similar, rank_similar};
pub use types::{LayoutSize, ScoredCandidate, SearchHit};
