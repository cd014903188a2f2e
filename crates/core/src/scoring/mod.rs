//! Similarity scoring.
//!
//! A reference item is profiled once ([`ReferenceProfile`]); every candidate
//! is then scored as the sum of seven independently weighted signals
//! (keyword overlap, stem-set overlap, term frequency, shared author,
//! popularity closeness, shared themes, prompt length closeness). Scores
//! are unbounded ranking signals, rounded to one decimal.

/// Weighted signals and per-candidate scoring.
pub mod scorer;
/// Static theme table and theme membership.
pub mod themes;

pub use scorer::{score_candidate, ReferenceProfile, ScoreBreakdown};
pub use themes::{Theme, ThemeSet, THEMES};
