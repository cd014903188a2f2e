//! Prompt text normalization.
//!
//! Prompts are split on whitespace and commas, short tokens and a closed
//! English stop-word list are dropped, and the remaining terms are reduced
//! with a first-match suffix stemmer. Reference terms are then expanded
//! through a small domain synonym dictionary into the enhanced keyword set
//! used by similarity scoring.

/// Keyword profile extraction for reference prompts.
pub mod keywords;
/// First-match suffix stemmer.
pub mod stemmer;
/// Domain synonym dictionary with bidirectional expansion.
pub mod synonyms;
/// Whitespace/comma tokenizer with stop word removal.
pub mod tokenizer;

pub use keywords::{Keyword, KeywordProfile};
pub use stemmer::stem;
pub use synonyms::related_terms;
pub use tokenizer::{tokenize_candidate, tokenize_keywords, Tokens};
