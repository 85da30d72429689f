//! Coarse attribute extraction from listing titles.
//!
//! Each extractor scans whitespace-split tokens left to right and returns
//! the first hit, lowercased, or `None`. They are pure functions: no
//! side effects, no panics, deterministic for a given lexicon.

use crate::lexicon::Lexicon;
use regex::Regex;
use std::sync::OnceLock;

/// `<digits><g|k|m>b`, whole token, case-insensitive (e.g. "256gb", "512MB").
fn storage_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\d+[gkm]b$").expect("static storage pattern"))
}

/// First token that is a known brand name, lowercased.
pub fn extract_brand(lex: &Lexicon, title: &str) -> Option<String> {
    title
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .find(|t| lex.is_brand(t))
}

/// First token that looks like a model number: contains a digit and is at
/// least two characters long. "2" alone is not a model; "Pro2" and "WH-1000XM5" are.
pub fn extract_model_number(title: &str) -> Option<String> {
    title
        .split_whitespace()
        .find(|t| t.chars().count() >= 2 && t.chars().any(|c| c.is_ascii_digit()))
        .map(|t| t.to_lowercase())
}

/// First token matching the storage-spec pattern (`128gb`, `1tb` does not
/// match — terabytes never appear in the source data's pattern).
pub fn extract_storage_spec(title: &str) -> Option<String> {
    title
        .split_whitespace()
        .find(|t| storage_regex().is_match(t))
        .map(|t| t.to_lowercase())
}

/// First token that is a known category/product-type word, lowercased.
pub fn extract_category(lex: &Lexicon, title: &str) -> Option<String> {
    title
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .find(|t| lex.is_category(t))
}
