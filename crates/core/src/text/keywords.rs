//! Keyword profile extraction for reference prompts.

use crate::text::stemmer::stem;
use crate::text::synonyms::related_terms;
use crate::text::tokenizer::tokenize_keywords;
use std::collections::HashSet;

/// An enhanced keyword paired with its stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub term: String,
    pub stem: String,
}

/// Normalized view of a reference prompt.
///
/// `terms` are the surviving prompt tokens (de-duplicated, first-occurrence
/// order), `stems` their stem set, and `keywords` the union of
/// [`related_terms`] over every term.
#[derive(Debug, Clone, Default)]
pub struct KeywordProfile {
    pub terms: Vec<String>,
    pub stems: HashSet<String>,
    pub keywords: Vec<Keyword>,
}

impl KeywordProfile {
    /// Extracts a profile. Empty or separator-only prompts yield an empty profile.
    pub fn extract(description: &str) -> Self {
        let tokens = tokenize_keywords(description);

        let mut terms: Vec<String> = Vec::with_capacity(tokens.len());
        let mut seen_terms: HashSet<&str> = HashSet::with_capacity(tokens.len());
        for token in tokens.iter() {
            if seen_terms.insert(token) {
                terms.push(token.to_string());
            }
        }

        let stems: HashSet<String> = terms.iter().map(|t| stem(t)).collect();

        let mut keywords: Vec<Keyword> = Vec::new();
        let mut seen_keywords: HashSet<String> = HashSet::new();
        for term in &terms {
            for related in related_terms(term) {
                if seen_keywords.insert(related.clone()) {
                    let stem = stem(&related);
                    keywords.push(Keyword {
                        term: related,
                        stem,
                    });
                }
            }
        }

        Self {
            terms,
            stems,
            keywords,
        }
    }

    /// Returns `true` if the prompt produced no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
