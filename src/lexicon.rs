//! Fixed word tables used by the query builder and the match scorer.
//!
//! Brand names, product categories, marketing fluff, and noise words are
//! loaded at compile time from `lexicon.json` via `include_str!` so there is
//! no runtime file I/O and no global mutable state. `Lexicon::embedded()`
//! hands out a shared reference to the parsed tables; tests that need a
//! custom vocabulary construct their own `Lexicon` directly.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Raw JSON content of the word tables, embedded at compile time.
const LEXICON_JSON: &str = include_str!("lexicon.json");

/// Immutable vocabulary tables for title analysis.
///
/// All entries are stored lowercase; lookups lowercase their input before
/// comparing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lexicon {
    /// Closed set of known brand names.
    pub brands: Vec<String>,
    /// Closed set of product-category tokens (product types).
    pub categories: Vec<String>,
    /// Marketing fluff stripped when building a search query.
    pub marketing_words: Vec<String>,
    /// Condition/color/unit words stripped before attribute extraction.
    /// May contain multi-word phrases; phrases are matched on word
    /// boundaries.
    pub noise_words: Vec<String>,
    /// Per-category keyword lists used for curated-listing relevance.
    pub category_keywords: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// Shared lexicon parsed from the embedded JSON.
    pub fn embedded() -> &'static Lexicon {
        static LEXICON: OnceLock<Lexicon> = OnceLock::new();
        LEXICON.get_or_init(|| serde_json::from_str(LEXICON_JSON).unwrap_or_default())
    }

    /// Whether `token` (already lowercased) is a known brand.
    pub fn is_brand(&self, token: &str) -> bool {
        self.brands.iter().any(|b| b == token)
    }

    /// Whether `token` (already lowercased) is a known category.
    pub fn is_category(&self, token: &str) -> bool {
        self.categories.iter().any(|c| c == token)
    }

    /// Keyword list for a curated-listing category, empty when unknown.
    pub fn keywords_for(&self, category: &str) -> &[String] {
        self.category_keywords
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
