//! Product records exchanged between the extraction, scoring, and search
//! layers, plus defensive price parsing.
//!
//! Every record lives for a single comparison request: built from whatever
//! upstream produced (page extraction, listing parse, curated list),
//! consumed by the scorer, then dropped. Nothing here persists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The product being priced — whatever the shopper is currently looking at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProduct {
    /// Raw listing title as scraped. May be empty.
    pub title: String,
    /// Price in dollars, `>= 0`. A price of 0 means "unknown" and degrades
    /// all price-based signals to neutral.
    #[serde(default)]
    pub price: f64,
}

impl SourceProduct {
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
        }
    }
}

/// A potential match found on the comparison marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProduct {
    pub title: String,
    #[serde(default)]
    pub price: f64,
    /// Marketplace category, when the listing carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form tags, when the listing carries them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CandidateProduct {
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
            category: None,
            tags: Vec::new(),
        }
    }
}

/// A candidate paired with its relevance score. Immutable once created.
///
/// The score is *not* guaranteed to lie in `[0, 1]`; see
/// [`crate::matching::scorer`] for why the range is left open.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub product: CandidateProduct,
    pub score: f64,
}

// ── Lenient price parsing ────────────────────────────────────────────────────

/// Parse a price out of arbitrary text, never failing.
///
/// Strips every character outside `[0-9.]` before the numeric parse, so
/// `"$1,299.00"` and `"USD 1299"` both come out as `1299.0`. Anything that
/// still refuses to parse (including NaN) maps to `0.0` — upstream scrapers
/// hand over garbage often enough that a hard error here would be noise.
pub fn parse_lenient_price(text: &str) -> f64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Lenient price extraction from a JSON value: numbers pass through,
/// strings go through [`parse_lenient_price`], everything else is `0.0`.
pub fn lenient_price_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_lenient_price(s),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_price_currency() {
        assert_eq!(parse_lenient_price("$49.99"), 49.99);
        assert_eq!(parse_lenient_price("USD 1,299.00"), 1299.0);
        assert_eq!(parse_lenient_price("  19.95  "), 19.95);
    }

    #[test]
    fn test_parse_lenient_price_garbage_is_zero() {
        assert_eq!(parse_lenient_price(""), 0.0);
        assert_eq!(parse_lenient_price("free shipping"), 0.0);
        // Two decimal points survive the strip but fail the parse.
        assert_eq!(parse_lenient_price("1.2.3"), 0.0);
    }

    #[test]
    fn test_lenient_price_value_types() {
        assert_eq!(lenient_price_value(&serde_json::json!(12.5)), 12.5);
        assert_eq!(lenient_price_value(&serde_json::json!("$12.50")), 12.5);
        assert_eq!(lenient_price_value(&serde_json::json!(null)), 0.0);
        assert_eq!(lenient_price_value(&serde_json::json!(["8.00"])), 0.0);
    }

    #[test]
    fn test_candidate_optional_fields_deserialize() {
        let c: CandidateProduct =
            serde_json::from_str(r#"{"title": "USB-C Cable 6ft", "price": 3.49}"#)
                .expect("minimal candidate");
        assert_eq!(c.category, None);
        assert!(c.tags.is_empty());
    }
}
