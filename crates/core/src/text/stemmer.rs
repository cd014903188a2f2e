//! First-match suffix stemmer.
//!
//! This is a crude normalizer, not a linguistic stemmer: the word is
//! lowercased and the first rule whose suffix matches is applied once.
//! Rules never chain, so `"lovingly"` becomes `"loving"`, not `"lov"`.

/// Ordered `(suffix, replacement)` rules. Earlier rules win.
const STEM_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ied", "y"),
    ("ying", "y"),
    ("ing", ""),
    ("ly", ""),
    ("ed", ""),
    ("s", ""),
];

/// Stems a single word.
pub fn stem(word: &str) -> String {
    let lowered = word.to_lowercase();
    for &(suffix, replacement) in STEM_RULES {
        if let Some(root) = lowered.strip_suffix(suffix) {
            let mut out = String::with_capacity(root.len() + replacement.len());
            out.push_str(root);
            out.push_str(replacement);
            return out;
        }
    }
    lowered
}
