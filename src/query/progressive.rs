//! Progressive query ladder — from most to least specific.
//!
//! A single cleaned query either nails the product or returns junk. The
//! progressive pipeline instead extracts the title's distinguishing
//! attributes (brand, product type, model number, storage spec) and emits
//! a ladder of queries ordered by specificity. The caller walks down the
//! ladder until a search returns usable candidates, and feeds the
//! specificity of the query that produced them into the scorer's bonus
//! term.

use crate::lexicon::Lexicon;
use crate::matching::attributes;
use regex::RegexBuilder;

/// One rung of the query ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCandidate {
    /// The query string. Attribute rungs come out lowercase; the raw-token
    /// fallback keeps the title's original casing.
    pub query: String,
    /// How many distinguishing attributes went into the query, in `[0, 1]`.
    pub specificity: f64,
    /// Human-readable description of the rung.
    pub label: &'static str,
}

/// Generate the query ladder for a title. Never empty: when no attribute
/// can be extracted, a single fallback rung carries the first four raw
/// tokens at specificity 0.4.
pub fn generate(lex: &Lexicon, title: &str) -> Vec<QueryCandidate> {
    let cleaned = strip_noise_words(lex, &title.to_lowercase());

    let brand = attributes::extract_brand(lex, &cleaned);
    let product_type = attributes::extract_category(lex, &cleaned);
    let model = attributes::extract_model_number(&cleaned);
    let storage = attributes::extract_storage_spec(&cleaned);

    let mut ladder = Vec::new();
    let mut push = |parts: &[&Option<String>], specificity: f64, label: &'static str| {
        if parts.iter().all(|p| p.is_some()) {
            let query = parts
                .iter()
                .filter_map(|p| p.as_deref())
                .collect::<Vec<_>>()
                .join(" ");
            ladder.push(QueryCandidate {
                query,
                specificity,
                label,
            });
        }
    };

    push(&[&brand, &product_type, &model, &storage], 1.0, "brand + type + model + storage");
    push(&[&brand, &product_type, &model], 0.8, "brand + type + model");
    push(&[&brand, &product_type], 0.6, "brand + type");
    push(&[&product_type, &model], 0.5, "type + model");
    push(&[&brand], 0.3, "brand only");
    push(&[&product_type], 0.2, "generic type");

    if ladder.is_empty() {
        let fallback: Vec<&str> = title.split_whitespace().take(4).collect();
        ladder.push(QueryCandidate {
            query: fallback.join(" "),
            specificity: 0.4,
            label: "fallback",
        });
    }
    ladder
}

/// Remove condition/color/unit words and phrases on word boundaries.
/// Multi-word phrases ("fully unlocked") match as a unit first.
fn strip_noise_words(lex: &Lexicon, title: &str) -> String {
    if lex.noise_words.is_empty() {
        return title.to_string();
    }
    let alternation = lex
        .noise_words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"\b(?:{alternation})\b");
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.replace_all(title, " ").into_owned(),
        Err(_) => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> &'static Lexicon {
        Lexicon::embedded()
    }

    #[test]
    fn test_full_ladder_for_rich_title() {
        let ladder = generate(lex(), "Apple iPhone 15 128gb Blue Fully Unlocked");
        assert_eq!(ladder[0].query, "apple iphone 15 128gb");
        assert_eq!(ladder[0].specificity, 1.0);
        // Every later rung is strictly less specific.
        for pair in ladder.windows(2) {
            assert!(pair[0].specificity > pair[1].specificity);
        }
        // Brand-only rung is present near the bottom.
        assert!(ladder.iter().any(|q| q.query == "apple" && q.specificity == 0.3));
    }

    #[test]
    fn test_noise_words_do_not_become_attributes() {
        // "blue" and "unlocked" are noise; without stripping, "blue" would
        // never match anyway, but "128gb" must survive as one token.
        let ladder = generate(lex(), "Samsung Phone Blue Unlocked 128gb");
        assert!(ladder[0].query.contains("128gb"));
        assert!(!ladder.iter().any(|q| q.query.contains("blue")));
    }

    #[test]
    fn test_fallback_rung_for_unrecognized_title() {
        let ladder = generate(lex(), "Handwoven Rattan Basket Set Of Three");
        assert_eq!(ladder.len(), 1);
        // Raw title tokens, original casing — unlike the attribute rungs.
        assert_eq!(ladder[0].query, "Handwoven Rattan Basket Set");
        assert_eq!(ladder[0].specificity, 0.4);
        assert_eq!(ladder[0].label, "fallback");
    }

    #[test]
    fn test_type_without_brand() {
        let ladder = generate(lex(), "Noise Cancelling Headphones Model X200");
        // No brand: ladder is type+model (0.5) then generic type (0.2).
        assert_eq!(ladder[0].specificity, 0.5);
        assert_eq!(ladder[0].query, "headphones x200");
        assert_eq!(ladder.last().map(|q| q.specificity), Some(0.2));
    }

    #[test]
    fn test_empty_title_still_yields_fallback() {
        let ladder = generate(lex(), "");
        assert_eq!(ladder.len(), 1);
        assert_eq!(ladder[0].query, "");
    }
}
