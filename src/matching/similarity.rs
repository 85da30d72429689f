//! Title similarity measures.
//!
//! Three measures, all case-insensitive, whitespace-split, no stemming.
//! They intentionally stay crude — listings on the two marketplaces are
//! written by different sellers in different registers, and anything
//! smarter than token overlap has not earned its keep against that noise.

use std::collections::HashSet;

/// Token-set overlap: `|common| / max(|a|, |b|)`.
///
/// Duplicate tokens in `a` count once per occurrence, mirroring how often
/// the shared word appears in the shorter title. Returns 0.0 when either
/// title is empty; identical titles score exactly 1.0.
pub fn token_overlap(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let tokens_a: Vec<String> = a.to_lowercase().split_whitespace().map(String::from).collect();
    let tokens_b: HashSet<String> =
        b.to_lowercase().split_whitespace().map(String::from).collect();
    let len_b = b.split_whitespace().count();
    let total = tokens_a.len().max(len_b);
    if total == 0 {
        return 0.0;
    }
    let common = tokens_a.iter().filter(|t| tokens_b.contains(*t)).count();
    common as f64 / total as f64
}

/// Containment overlap: the fraction of source tokens longer than two
/// characters that appear as substrings of the candidate title.
///
/// Asymmetric by design — it asks "how much of what the shopper searched
/// for shows up in this listing", not the reverse. Used by the simple
/// best-match policy.
pub fn containment_overlap(source: &str, candidate: &str) -> f64 {
    let candidate = candidate.to_lowercase();
    let tokens: Vec<String> = source
        .to_lowercase()
        .split_whitespace()
        .filter(|t| t.len() > 2)
        .map(String::from)
        .collect();
    if tokens.is_empty() {
        return 0.0;
    }
    let matched = tokens.iter().filter(|t| candidate.contains(t.as_str())).count();
    matched as f64 / tokens.len() as f64
}

/// Bidirectional fuzzy overlap: the fraction of `a`'s tokens that contain,
/// or are contained in, some token of `b`. Tolerates pluralization and
/// compound words ("earbud" vs "earbuds", "smartwatch" vs "watch"). Used
/// for curated-listing relevance.
pub fn bidirectional_overlap(a: &str, b: &str) -> f64 {
    let tokens_a: Vec<String> = a.to_lowercase().split_whitespace().map(String::from).collect();
    let tokens_b: Vec<String> = b.to_lowercase().split_whitespace().map(String::from).collect();
    if tokens_a.is_empty() {
        return 0.0;
    }
    let common = tokens_a
        .iter()
        .filter(|ta| tokens_b.iter().any(|tb| tb.contains(ta.as_str()) || ta.contains(tb.as_str())))
        .count();
    common as f64 / tokens_a.len() as f64
}
