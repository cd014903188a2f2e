//! Weighted similarity signals.
//!
//! Scores a candidate against a precomputed [`ReferenceProfile`] with the
//! weights in [`crate::config`]. Each signal is non-negative, so the total
//! is non-negative.

use crate::config;
use crate::content::ContentItem;
use crate::scoring::themes::ThemeSet;
use crate::text::keywords::KeywordProfile;
use crate::text::stemmer::stem;
use crate::text::tokenizer::tokenize_candidate;
use std::collections::HashSet;

/// Everything about the reference item that scoring needs, computed once per request.
#[derive(Debug)]
pub struct ReferenceProfile<'a> {
    item: &'a ContentItem,
    char_len: usize,
    keywords: KeywordProfile,
    themes: ThemeSet,
}

impl<'a> ReferenceProfile<'a> {
    pub fn new(item: &'a ContentItem) -> Self {
        let lowered = item.description.to_lowercase();
        Self {
            item,
            char_len: lowered.chars().count(),
            keywords: KeywordProfile::extract(&item.description),
            themes: ThemeSet::detect(&lowered),
        }
    }

    /// Terms, stems, and enhanced keywords of the reference prompt.
    pub fn keywords(&self) -> &KeywordProfile {
        &self.keywords
    }
}

/// Per-signal contributions for one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub keyword_overlap: f64,
    pub set_overlap: f64,
    pub term_frequency: f64,
    pub shared_author: f64,
    pub popularity: f64,
    pub theme: f64,
    pub length: f64,
}

impl ScoreBreakdown {
    /// Unrounded sum of all signals.
    pub fn raw(&self) -> f64 {
        self.keyword_overlap
            + self.set_overlap
            + self.term_frequency
            + self.shared_author
            + self.popularity
            + self.theme
            + self.length
    }

    /// Final score, rounded to one decimal.
    pub fn total(&self) -> f64 {
        round_to_tenth(self.raw())
    }
}

/// Rounds half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scores one candidate against the reference.
pub fn score_candidate(reference: &ReferenceProfile<'_>, candidate: &ContentItem) -> ScoreBreakdown {
    let tokens = tokenize_candidate(&candidate.description);
    let lowered = tokens.lowered();
    let candidate_terms: Vec<(&str, String)> = tokens.iter().map(|t| (t, stem(t))).collect();
    let candidate_stems: HashSet<&str> = candidate_terms.iter().map(|(_, s)| s.as_str()).collect();
    let reference_stems: HashSet<&str> = reference.keywords.stems.iter().map(String::as_str).collect();

    ScoreBreakdown {
        keyword_overlap: keyword_overlap(&reference.keywords, &candidate_terms),
        set_overlap: set_overlap(&reference_stems, &candidate_stems) * config::SET_OVERLAP_WEIGHT,
        term_frequency: term_frequency_bonus(&reference.keywords.terms, lowered),
        shared_author: if candidate.author == reference.item.author {
            config::SHARED_AUTHOR_BONUS
        } else {
            0.0
        },
        popularity: popularity_bonus(reference.item.popularity, candidate.popularity),
        theme: theme_bonus(reference.themes, ThemeSet::detect(lowered)),
        length: length_bonus(reference.char_len, lowered.chars().count()),
    }
}

/// Counts (keyword, candidate token) pairs that match by stem or by substring
/// containment in either direction. Every pair counts; there is no per-keyword cap.
fn keyword_overlap(profile: &KeywordProfile, candidate_terms: &[(&str, String)]) -> f64 {
    let mut matches = 0usize;
    for keyword in &profile.keywords {
        for (token, token_stem) in candidate_terms {
            if *token_stem == keyword.stem
                || token.contains(keyword.term.as_str())
                || keyword.term.contains(*token)
            {
                matches += 1;
            }
        }
    }
    matches as f64 * config::KEYWORD_MATCH_WEIGHT
}

/// `|A ∩ B| / sqrt(|A| * |B|)` over binary-presence sets; 0 when either is empty.
pub fn set_overlap(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count() as f64;
    shared / ((a.len() as f64) * (b.len() as f64)).sqrt()
}

/// Sums, over reference terms, the share of the candidate's whitespace-split
/// words that contain the term.
fn term_frequency_bonus(terms: &[String], candidate_lowered: &str) -> f64 {
    let words: Vec<&str> = candidate_lowered.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let total = words.len() as f64;
    terms
        .iter()
        .map(|term| {
            let hits = words.iter().filter(|w| w.contains(term.as_str())).count();
            hits as f64 / total * config::TERM_FREQUENCY_WEIGHT
        })
        .sum()
}

/// Tiered bonus on `1 - |a - b| / (max(a, b) + 1)`.
pub fn popularity_bonus(a: u64, b: u64) -> f64 {
    let closeness = 1.0 - a.abs_diff(b) as f64 / (a.max(b) as f64 + 1.0);
    config::POPULARITY_TIERS
        .iter()
        .find(|(floor, _)| closeness > *floor)
        .map(|&(_, bonus)| bonus)
        .unwrap_or(0.0)
}

fn theme_bonus(reference: ThemeSet, candidate: ThemeSet) -> f64 {
    reference
        .intersection(candidate)
        .iter()
        .map(|t| config::THEME_BONUS * t.weight)
        .sum()
}

/// Tiered bonus on the absolute difference in prompt character length.
pub fn length_bonus(a: usize, b: usize) -> f64 {
    let diff = a.abs_diff(b);
    config::LENGTH_TIERS
        .iter()
        .find(|(ceiling, _)| diff < *ceiling)
        .map(|&(_, bonus)| bonus)
        .unwrap_or(0.0)
}
