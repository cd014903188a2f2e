//! Whitespace/comma tokenizer with stop word removal.
//!
//! Tokenizes text by lowercasing and splitting on runs of whitespace and
//! commas. Tokens of two characters or fewer are discarded; keyword
//! tokenization additionally drops a closed list of English stop words.
//! Uses a zero-per-token allocation design via byte spans.

use crate::config;
use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
        "our", "out", "day", "get", "has", "him", "his", "how", "its", "may", "new", "now", "old",
        "see", "two", "who", "boy", "did", "she", "use", "way", "say",
    ]
    .into_iter()
    .collect()
});

/// Tokenized text: owns the lowercased buffer, provides &str slices via byte spans.
/// Only 1 heap allocation (the lowercased String) instead of N per-token Strings.
pub struct Tokens {
    buffer: String,
    spans: Vec<(u32, u32)>, // (start, end) byte offsets into buffer
}

impl Tokens {
    /// Returns an iterator over the token `&str` slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans
            .iter()
            .map(|&(s, e)| &self.buffer[s as usize..e as usize])
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The full lowercased input.
    pub fn lowered(&self) -> &str {
        &self.buffer
    }
}

/// Returns `true` if `word` (already lowercased) is on the stop list.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn is_term(token: &str) -> bool {
    token.chars().count() > config::MIN_TERM_CHARS
}

fn split_with(text: &str, keep: impl Fn(&str) -> bool) -> Tokens {
    let buffer = text.to_lowercase();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in buffer.char_indices() {
        if !is_separator(c) {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start {
            if keep(&buffer[s..i]) {
                spans.push((s as u32, i as u32));
            }
            start = None;
        }
    }
    if let Some(s) = start {
        if keep(&buffer[s..]) {
            spans.push((s as u32, buffer.len() as u32));
        }
    }

    Tokens { buffer, spans }
}

/// Tokenize a reference prompt: lowercase, split, drop short tokens and stop words.
pub fn tokenize_keywords(text: &str) -> Tokens {
    split_with(text, |t| is_term(t) && !is_stop_word(t))
}

/// Tokenize a candidate prompt: lowercase, split, drop short tokens only.
pub fn tokenize_candidate(text: &str) -> Tokens {
    split_with(text, is_term)
}
