//! Search query construction from raw listing titles.
//!
//! Marketplace search boxes reward short, concrete queries. The builder
//! strips marketing fluff and decoration from a scraped title and keeps
//! the first few informative tokens; anything fancier (stemming, synonym
//! expansion) hurt result quality in practice because the downstream
//! search engine does its own expansion.

pub mod progressive;

use crate::lexicon::Lexicon;
use regex::Regex;
use std::sync::OnceLock;

/// Default number of tokens kept in a query. Six keeps queries under the
/// marketplace's effective term limit; up to eight works for long titles.
pub const DEFAULT_MAX_TOKENS: usize = 6;

/// `(...)` and `[...]` segments — decoration like "(2nd Generation)" or
/// "[2-Pack]" that never helps search.
fn bracketed_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").expect("static bracket pattern"))
}

/// Any run of characters that is neither word-like nor whitespace.
fn punctuation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]+").expect("static punctuation pattern"))
}

/// Reduce a raw product title to a short marketplace search query.
///
/// Pipeline: drop bracketed segments, remove every marketing word
/// (case-insensitive literal removal), collapse punctuation to spaces,
/// collapse whitespace, keep the first `max_tokens` tokens. Original
/// casing of surviving tokens is preserved.
///
/// An empty or all-fluff title yields the empty string — the caller must
/// treat that as "no search possible" rather than searching for "".
pub fn build_search_query(lex: &Lexicon, title: &str, max_tokens: usize) -> String {
    let mut text = bracketed_regex().replace_all(title, " ").into_owned();
    for word in &lex.marketing_words {
        text = remove_case_insensitive(&text, word);
    }
    let text = punctuation_regex().replace_all(&text, " ");

    text.split_whitespace()
        .take(max_tokens)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove every case-insensitive occurrence of `needle` from `text`.
/// Matches inside words too ("Amazonia" loses its "Amazon"), mirroring
/// the upstream data this was tuned against.
fn remove_case_insensitive(text: &str, needle: &str) -> String {
    if needle.is_empty() {
        return text.to_string();
    }
    let lower_text = text.to_lowercase();
    let lower_needle = needle.to_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(found) = lower_text[pos..].find(&lower_needle) {
        let start = pos + found;
        out.push_str(&text[pos..start]);
        pos = start + lower_needle.len();
    }
    out.push_str(&text[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> &'static Lexicon {
        Lexicon::embedded()
    }

    #[test]
    fn test_builds_short_query() {
        let q = build_search_query(
            lex(),
            "Sony WH-CH520 Wireless Headphones with Microphone, Bluetooth, Up to 50 Hours",
            DEFAULT_MAX_TOKENS,
        );
        assert_eq!(q, "Sony WH CH520 Wireless Headphones with");
        assert_eq!(q.split_whitespace().count(), DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_strips_marketing_and_brackets() {
        let q = build_search_query(
            lex(),
            "Brand New Genuine Widget (Official Amazon Edition) [Sealed]",
            8,
        );
        assert_eq!(q, "Widget");
    }

    #[test]
    fn test_empty_or_all_fluff_title() {
        assert_eq!(build_search_query(lex(), "", 6), "");
        assert_eq!(build_search_query(lex(), "Genuine Official Brand", 6), "");
        assert_eq!(build_search_query(lex(), "!!! ***", 6), "");
    }

    #[test]
    fn test_remove_case_insensitive_inside_words() {
        assert_eq!(remove_case_insensitive("AMAZON Amazonia", "amazon"), " ia");
        assert_eq!(remove_case_insensitive("untouched", "xyz"), "untouched");
    }
}
