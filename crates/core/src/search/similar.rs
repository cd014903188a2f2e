//! "Find similar" ranking.
//!
//! Scores every other item of the reference's kind, drops anything at or
//! below [`config::MIN_SIMILARITY_SCORE`], sorts by score descending with
//! ties kept in pool order, truncates to [`config::MAX_SIMILAR_RESULTS`], and
//! tags each survivor with a rank-derived layout hint.

use crate::config;
use crate::content::{ContentItem, ContentKind};
use crate::error::{GalleryError, GalleryResult};
use crate::scoring::{score_candidate, ReferenceProfile};
use crate::search::types::{LayoutSize, ScoredCandidate};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Ranks items similar to `(kind, id)` within `pool`.
///
/// Returns [`GalleryError::NotFound`] when the reference is absent. The pool
/// may mix kinds; only items of the reference's kind are considered.
pub fn find_similar(
    kind: ContentKind,
    id: u64,
    pool: &[ContentItem],
) -> GalleryResult<Vec<ScoredCandidate>> {
    let reference = pool
        .iter()
        .find(|item| item.kind == kind && item.id == id)
        .ok_or(GalleryError::NotFound { kind, id })?;
    Ok(rank_similar(reference, pool))
}

/// Ranks `pool` against an already located reference item.
pub fn rank_similar(reference: &ContentItem, pool: &[ContentItem]) -> Vec<ScoredCandidate> {
    let profile = ReferenceProfile::new(reference);

    let mut results: Vec<ScoredCandidate> = pool
        .iter()
        .filter(|c| c.kind == reference.kind && c.id != reference.id)
        .filter_map(|c| {
            let score = score_candidate(&profile, c).total();
            (score > config::MIN_SIMILARITY_SCORE).then(|| ScoredCandidate {
                item: c.clone(),
                score,
                layout: LayoutSize::Standard,
            })
        })
        .collect();

    // sort_by_key is stable: equal scores keep pool order
    results.sort_by_key(|c| Reverse(OrderedFloat(c.score)));
    results.truncate(config::MAX_SIMILAR_RESULTS);
    for (index, candidate) in results.iter_mut().enumerate() {
        candidate.layout = LayoutSize::for_similar(index);
    }

    tracing::debug!(
        kind = %reference.kind,
        id = reference.id,
        terms = profile.keywords().terms.len(),
        keywords = profile.keywords().keywords.len(),
        results = results.len(),
        "Ranked similar items"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: u64, prompt: &str, author: &str, likes: u64) -> ContentItem {
        ContentItem::new(ContentKind::Image, id, prompt, author, likes)
    }

    fn video(id: u64, prompt: &str, author: &str, likes: u64) -> ContentItem {
        ContentItem::new(ContentKind::Video, id, prompt, author, likes)
    }

    fn gallery_pool() -> Vec<ContentItem> {
        vec![
            image(1, "fantasy castle in the clouds", "mira", 120),
            image(2, "ancient dragon awakening", "kai", 40),
            image(3, "enchanted castle at dawn, fantasy art", "mira", 118),
            image(4, "bowl of lemons on a table", "lio", 3),
            image(5, "cyberpunk street with neon rain", "kai", 300),
            video(1, "fantasy castle flythrough", "mira", 120),
        ]
    }

    #[test]
    fn test_not_found() {
        let pool = gallery_pool();
        let err = find_similar(ContentKind::Video, 99, &pool).unwrap_err();
        assert!(matches!(
            err,
            GalleryError::NotFound {
                kind: ContentKind::Video,
                id: 99
            }
        ));
    }

    #[test]
    fn test_excludes_reference_and_other_kinds() {
        let pool = gallery_pool();
        let results = find_similar(ContentKind::Image, 1, &pool).unwrap();
        assert!(!results.is_empty());
        for r in &results {
            assert_eq!(r.item.kind, ContentKind::Image);
            assert_ne!(r.item.id, 1);
        }
    }

    #[test]
    fn test_ranking_order() {
        let pool = gallery_pool();
        let results = find_similar(ContentKind::Image, 1, &pool).unwrap();
        let ids: Vec<u64> = results.iter().map(|r| r.item.id).collect();
        assert_eq!(ids[0], 3, "shared keywords, author and theme rank first");
        assert!(ids.contains(&2), "dragon shares the fantasy theme");
        assert!(!ids.contains(&4), "unrelated still life falls below threshold");
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_only_same_kind_candidates() {
        let pool = gallery_pool();
        let results = find_similar(ContentKind::Video, 1, &pool).unwrap();
        // image 1 shares the id but not the kind, and there is no other video
        assert!(results.is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        // empty reference: only popularity (+5) and length can contribute
        let long = "x".repeat(60);
        let pool = vec![image(1, "", "a", 10), image(2, &long, "b", 10)];
        assert!(find_similar(ContentKind::Image, 1, &pool).unwrap().is_empty());

        let shorter = "x".repeat(30);
        let pool = vec![image(1, "", "a", 10), image(2, &shorter, "b", 10)];
        let results = find_similar(ContentKind::Image, 1, &pool).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 6.0);
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let mut pool = vec![image(1, "", "a", 10)];
        for id in 2..=6 {
            pool.push(image(id, "zzz", "b", 10));
        }
        let results = find_similar(ContentKind::Image, 1, &pool).unwrap();
        let ids: Vec<u64> = results.iter().map(|r| r.item.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let mut pool = vec![image(0, "dragon", "a", 10)];
        for id in 1..=80 {
            pool.push(image(id, "dragon", "a", 10));
        }
        let results = find_similar(ContentKind::Image, 0, &pool).unwrap();
        assert_eq!(results.len(), config::MAX_SIMILAR_RESULTS);
        assert_eq!(results[0].item.id, 1);
        assert_eq!(results[59].item.id, 60);
    }

    #[test]
    fn test_layout_assigned_by_rank() {
        let mut pool = vec![image(0, "dragon", "a", 10)];
        for id in 1..=20 {
            pool.push(image(id, "dragon", "a", 10));
        }
        let results = find_similar(ContentKind::Image, 0, &pool).unwrap();
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.layout, LayoutSize::for_similar(i));
        }
    }

    #[test]
    fn test_idempotent() {
        let pool = gallery_pool();
        let a = find_similar(ContentKind::Image, 1, &pool).unwrap();
        let b = find_similar(ContentKind::Image, 1, &pool).unwrap();
        assert_eq!(a, b);
    }
}
