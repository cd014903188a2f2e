//! # ainura-core
//!
//! Content model and ranking logic for the AiNura gallery: prompt
//! normalization, "similar items" scoring, prompt search, and the in-memory
//! content pool the HTTP layer serves from.
//!
//! This crate has no async dependencies. Every ranking call is a pure
//! function of the pool it is given.

/// Global configuration constants: scoring weights, thresholds, limits, and defaults.
pub mod config;
/// Content records: `ContentItem`, `ContentKind`, and the listing wire format.
pub mod content;
/// Error type shared by the core crate.
pub mod error;
/// Similarity scoring: reference profiles, weighted signals, and themes.
pub mod scoring;
/// Ranking entry points: similar items, prompt search, sort orders, and layout hints.
pub mod search;
/// Content pool partitions and JSON listing persistence.
pub mod storage;
/// Text normalization: tokenizer, stemmer, and synonym expansion.
pub mod text;

pub use content::{ContentItem, ContentKind};
pub use error::{GalleryError, GalleryResult};
pub use storage::{Gallery, NewItem};
