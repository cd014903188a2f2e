//! Domain synonym dictionary.
//!
//! Maps a canonical stemmed concept to related vocabulary. Expansion is
//! bidirectional: a key pulls in its synonyms, and a synonym pulls in its
//! key and every sibling synonym. Words listed under several keys (e.g.
//! `mystical`) expand through all of them.

use crate::text::stemmer::stem;
use std::collections::HashSet;

/// `(canonical stem, related terms)`, in lookup order.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("fantasy", &["magical", "mythical", "enchanted", "mystical", "fairy", "legendary"]),
    ("dragon", &["wyvern", "drake", "serpent", "beast", "monster"]),
    ("castle", &["fortress", "palace", "citadel", "stronghold", "keep"]),
    ("cyberpunk", &["futuristic", "dystopian", "neon", "cyber", "digital", "tech"]),
    ("space", &["cosmic", "stellar", "galactic", "universe", "astronomy", "planetary"]),
    ("ocean", &["sea", "marine", "aquatic", "underwater", "nautical", "maritime"]),
    ("forest", &["woodland", "jungle", "trees", "nature", "wilderness"]),
    ("robot", &["android", "cyborg", "automaton", "ai", "artificial", "mechanical"]),
    ("magic", &["spell", "enchantment", "sorcery", "wizardry", "mystical"]),
    ("urban", &["city", "metropolitan", "downtown", "street", "cityscape"]),
    ("vintage", &["retro", "classic", "antique", "old-fashioned", "nostalgic"]),
    ("bright", &["colorful", "vibrant", "brilliant", "luminous", "radiant"]),
    ("dark", &["gloomy", "shadowy", "mysterious", "noir", "gothic"]),
];

/// Returns the synonyms registered for a canonical stem.
pub fn synonyms_of(key: &str) -> Option<&'static [&'static str]> {
    SYNONYMS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, list)| *list)
}

/// Expands a word into itself, its stem, and related dictionary terms.
///
/// The result is de-duplicated and keeps first-occurrence order, so the
/// same input always yields the same sequence.
pub fn related_terms(word: &str) -> Vec<String> {
    let word = word.to_lowercase();
    let stemmed = stem(&word);

    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut push = |term: &str| {
        if seen.insert(term.to_string()) {
            out.push(term.to_string());
        }
    };

    push(word.as_str());
    push(stemmed.as_str());

    if let Some(list) = synonyms_of(&stemmed) {
        for &s in list {
            push(s);
        }
    }

    for &(key, list) in SYNONYMS {
        if list.contains(&stemmed.as_str()) {
            push(key);
            for &s in list {
                push(s);
            }
        }
    }

    out
}
