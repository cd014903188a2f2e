//! Keyword search over prompts.
//!
//! The query is lowercased and split on single spaces. An item matches when
//! any term is a substring of its lowercased prompt. Relevance rewards whole
//! word matches over partial ones and adds a bonus when several terms hit.

use crate::config;
use crate::content::ContentItem;
use crate::search::filter::{KindFilter, SortOrder};
use crate::search::types::{LayoutSize, SearchHit};

/// Options for [`search_prompts`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptQuery {
    pub kind: KindFilter,
    pub sort: SortOrder,
}

/// Splits a query into lowercase terms. Repeated spaces produce no empty terms.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Relevance of a lowercased prompt for `terms`, or `None` if no term occurs in it.
pub fn relevance(terms: &[String], prompt_lowered: &str) -> Option<u32> {
    let words: Vec<&str> = prompt_lowered.split(' ').collect();
    let mut score = 0u32;
    let mut matching = 0u32;

    for term in terms {
        if words.contains(&term.as_str()) {
            score += config::SEARCH_EXACT_WORD_SCORE;
        } else if prompt_lowered.contains(term.as_str()) {
            score += config::SEARCH_PARTIAL_SCORE;
        }
        if prompt_lowered.contains(term.as_str()) {
            matching += 1;
        }
    }

    if matching == 0 {
        return None;
    }
    if matching > 1 {
        score += matching * config::SEARCH_MULTI_TERM_BONUS;
    }
    Some(score)
}

/// Searches prompts across `pool`, applying the kind filter and sort order.
///
/// An empty or blank query returns no hits. Layout hints are assigned after
/// sorting, by final position.
pub fn search_prompts<'a, I>(query: &str, pool: I, options: &PromptQuery) -> Vec<SearchHit>
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = pool
        .into_iter()
        .filter(|item| options.kind.matches(item.kind))
        .filter_map(|item| {
            let lowered = item.description.to_lowercase();
            relevance(&terms, &lowered).map(|relevance| SearchHit {
                item: item.clone(),
                relevance,
                layout: LayoutSize::Standard,
            })
        })
        .collect();

    options.sort.apply(&mut hits);
    for (index, hit) in hits.iter_mut().enumerate() {
        hit.layout = LayoutSize::for_listing(index);
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;

    fn pool() -> Vec<ContentItem> {
        vec![
            ContentItem::new(ContentKind::Image, 1, "Neon city at night", "kai", 50),
            ContentItem::new(ContentKind::Image, 2, "dragon over the citadel", "mira", 80),
            ContentItem::new(ContentKind::Video, 3, "city dragon parade", "lio", 10),
            ContentItem::new(ContentKind::Video, 4, "", "lio", 99),
        ]
    }

    fn ids(hits: &[SearchHit]) -> Vec<u64> {
        hits.iter().map(|h| h.item.id).collect()
    }

    #[test]
    fn test_query_terms() {
        assert_eq!(query_terms("  Neon  City "), vec!["neon", "city"]);
        assert!(query_terms("   ").is_empty());
    }

    #[test]
    fn test_relevance_exact_partial_and_bonus() {
        let terms = query_terms("city dragon");
        // exact "city" (5) + exact "dragon" (5) + 2 matching terms * 2
        assert_eq!(relevance(&terms, "city dragon parade"), Some(14));
        // "city" is not a substring of "citadel"
        assert_eq!(relevance(&terms, "dragon over the citadel"), Some(5));
        assert_eq!(relevance(&query_terms("cit"), "dragon over the citadel"), Some(1));
        assert_eq!(relevance(&terms, "quiet lake"), None);
    }

    #[test]
    fn test_search_relevance_order() {
        let pool = pool();
        let hits = search_prompts("city dragon", &pool, &PromptQuery::default());
        assert_eq!(ids(&hits), vec![3, 1, 2]);
        assert_eq!(hits[0].layout, LayoutSize::Tall);
        assert_eq!(hits[1].layout, LayoutSize::Standard);
    }

    #[test]
    fn test_search_kind_filter_and_sort() {
        let pool = pool();
        let options = PromptQuery {
            kind: KindFilter::Only(ContentKind::Image),
            sort: SortOrder::Likes,
        };
        let hits = search_prompts("city dragon", &pool, &options);
        assert_eq!(ids(&hits), vec![2, 1]);
    }

    #[test]
    fn test_empty_query() {
        let pool = pool();
        assert!(search_prompts("", &pool, &PromptQuery::default()).is_empty());
        assert!(search_prompts("   ", &pool, &PromptQuery::default()).is_empty());
    }
}
