//! Parse candidate products out of a search-results page.
//!
//! The results page is a React SPA; the server-rendered HTML carries the
//! product data as a `window.__INITIAL_PROPS__` state blob inside a script
//! tag. Two strategies, tried in order:
//!
//! 1. **State JSON** — walk `<script>` tags, capture the state object, and
//!    probe the known product-array paths. Highest fidelity: real titles,
//!    exact prices.
//! 2. **Regex fallback** — when the state blob is absent or unparseable,
//!    scan the raw HTML for name/price field pairs. Good enough to keep
//!    the comparison alive through markup changes.
//!
//! Either way the output is a plain `Vec<CandidateProduct>`; junk input
//! yields an empty vector, never an error — markup drift on a third-party
//! site is an expected condition, not a failure.

use crate::catalog::{lenient_price_value, CandidateProduct};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Cap on candidates scraped by the regex fallback; a blind scan over raw
/// HTML repeats itself past this point. The state-JSON strategy is not
/// capped — the array there is the page's own result set.
const MAX_LISTINGS: usize = 20;

/// Titles outside this length range are parse artifacts, not products.
const TITLE_LEN: std::ops::Range<usize> = 6..200;

/// `window.__INITIAL_PROPS__ = {...};`
fn state_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)window\.__INITIAL_PROPS__\s*=\s*(\{.*?\});").expect("static state pattern")
    })
}

/// Extract candidate products from search-results HTML.
pub fn parse_listings(html: &str) -> Vec<CandidateProduct> {
    if let Some(candidates) = parse_state_json(html) {
        if !candidates.is_empty() {
            debug!(count = candidates.len(), "extracted listings from state JSON");
            return candidates;
        }
    }
    let fallback = regex_fallback(html);
    debug!(count = fallback.len(), "extracted listings via regex fallback");
    fallback
}

// ── Strategy 1: SPA state JSON ───────────────────────────────────────────────

/// Known locations of the product array inside the state object.
const PRODUCT_PATHS: &[&[&str]] = &[
    &["searchStore", "productList"],
    &["searchStore", "goodsList"],
    &["searchStore", "items"],
    &["goodsList"],
    &["productList"],
    &["items"],
    &["data", "productList"],
    &["data", "items"],
];

fn parse_state_json(html: &str) -> Option<Vec<CandidateProduct>> {
    let document = Html::parse_document(html);
    let script_sel = Selector::parse("script").ok()?;

    for script in document.select(&script_sel) {
        let text: String = script.text().collect();
        if !text.contains("__INITIAL_PROPS__") {
            continue;
        }
        let captured = state_regex().captures(&text)?;
        let state: Value = serde_json::from_str(captured.get(1)?.as_str()).ok()?;

        for path in PRODUCT_PATHS {
            let mut node = &state;
            for key in *path {
                node = &node[*key];
            }
            if let Some(array) = node.as_array() {
                if array.is_empty() {
                    continue;
                }
                let candidates: Vec<CandidateProduct> =
                    array.iter().filter_map(candidate_from_state).collect();
                return Some(candidates);
            }
        }
        return Some(Vec::new());
    }
    None
}

/// Build a candidate from one state-object product entry. Titles live
/// under `title`/`goodsName`/`subject`; the price sits behind a chain of
/// historical field names.
fn candidate_from_state(item: &Value) -> Option<CandidateProduct> {
    let title = ["title", "goodsName", "subject"]
        .iter()
        .find_map(|k| item[*k].as_str())
        .map(str::trim)?;
    if title.is_empty() {
        return None;
    }

    let price = ["priceInfo", "price", "minPrice", "marketPrice", "salePrice"]
        .iter()
        .map(|k| {
            if *k == "priceInfo" {
                lenient_price_value(&item["priceInfo"]["price"])
            } else {
                lenient_price_value(&item[*k])
            }
        })
        .find(|p| *p > 0.0)?;

    Some(CandidateProduct {
        title: title.to_string(),
        price,
        category: item["category"].as_str().map(String::from),
        tags: Vec::new(),
    })
}

// ── Strategy 2: regex fallback ───────────────────────────────────────────────

/// Field-pair patterns for raw HTML, one per historical payload shape.
fn fallback_regexes() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(
                r#"(?s)"goodsName":\s*"([^"]+)".*?"priceInfo":\s*\{[^}]*"price":\s*"?([0-9]+)"?"#,
            )
            .expect("static goodsName pattern"),
            Regex::new(r#"(?s)"title":\s*"([^"]+)".*?"price":\s*"?([0-9]+)"?"#)
                .expect("static title pattern"),
            Regex::new(r#"(?s)"subject":\s*"([^"]+)".*?"salePrice":\s*"?([0-9]+)"?"#)
                .expect("static subject pattern"),
        ]
    })
}

fn regex_fallback(html: &str) -> Vec<CandidateProduct> {
    for pattern in fallback_regexes() {
        let mut candidates = Vec::new();
        for caps in pattern.captures_iter(html).take(MAX_LISTINGS) {
            let (Some(title_m), Some(price_m)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let title = clean_title(title_m.as_str());
            if !TITLE_LEN.contains(&title.len()) {
                continue;
            }
            let Ok(raw_price) = price_m.as_str().parse::<i64>() else {
                continue;
            };
            if raw_price <= 0 {
                continue;
            }
            candidates.push(CandidateProduct::new(title, normalize_integer_price(raw_price)));
        }
        if !candidates.is_empty() {
            return candidates;
        }
    }
    Vec::new()
}

/// Integer prices above 999 are cents; smaller values are whole dollars.
fn normalize_integer_price(raw: i64) -> f64 {
    if raw > 999 {
        raw as f64 / 100.0
    } else {
        raw as f64
    }
}

/// Undo JSON string escaping and drop unicode escapes the fallback cannot
/// decode positionally.
fn clean_title(raw: &str) -> String {
    static UNICODE_RE: OnceLock<Regex> = OnceLock::new();
    let re = UNICODE_RE
        .get_or_init(|| Regex::new(r"\\u[0-9a-fA-F]{4}").expect("static unicode pattern"));
    let unescaped = raw.replace(r#"\""#, "\"");
    re.replace_all(&unescaped, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_page(products: &str) -> String {
        format!(
            r#"<html><head><script>window.__INITIAL_PROPS__ = {{"searchStore": {{"productList": {products}}}}};</script></head><body></body></html>"#
        )
    }

    #[test]
    fn test_parses_state_json_products() {
        let html = state_page(
            r#"[
                {"goodsName": "Wireless Earbuds Pro", "priceInfo": {"price": "12.99"}},
                {"title": "Bluetooth Speaker Mini", "price": 8},
                {"subject": "Phone Stand", "salePrice": "4.50"}
            ]"#,
        );
        let listings = parse_listings(&html);
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].title, "Wireless Earbuds Pro");
        assert_eq!(listings[0].price, 12.99);
        assert_eq!(listings[1].price, 8.0);
        assert_eq!(listings[2].price, 4.5);
    }

    #[test]
    fn test_state_entries_without_price_are_skipped() {
        let html = state_page(r#"[{"title": "Mystery Item"}, {"title": "Good Item", "price": 3}]"#);
        let listings = parse_listings(&html);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Good Item");
    }

    #[test]
    fn test_regex_fallback_when_no_state_blob() {
        let html = r#"<html><body><script>
            var data = {"goodsName": "Folding Desk Lamp", "priceInfo": {"currency": "USD", "price": 1599}};
        </script></body></html>"#;
        let listings = parse_listings(html);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Folding Desk Lamp");
        // 1599 > 999 → cents.
        assert_eq!(listings[0].price, 15.99);
    }

    #[test]
    fn test_fallback_small_integer_is_dollars() {
        let html = r#"{"title": "Silicone Spatula Set", "price": 7}"#;
        let listings = parse_listings(html);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].price, 7.0);
    }

    #[test]
    fn test_fallback_filters_degenerate_titles() {
        let long_title = "x".repeat(250);
        let html = format!(
            r#"{{"title": "abc", "price": 5}} {{"title": "{long_title}", "price": 5}}"#
        );
        assert!(parse_listings(&html).is_empty());
    }

    #[test]
    fn test_junk_input_yields_empty() {
        assert!(parse_listings("").is_empty());
        assert!(parse_listings("<html><body><p>nothing here</p></body></html>").is_empty());
        // State blob present but malformed JSON: fall through to regex, find nothing.
        let html = "<script>window.__INITIAL_PROPS__ = {broken;</script>";
        assert!(parse_listings(html).is_empty());
    }

    #[test]
    fn test_state_json_strategy_is_uncapped() {
        let mut entries = Vec::new();
        for i in 0..30 {
            entries.push(format!(r#"{{"title": "Bulk Item {i:02}", "price": 2}}"#));
        }
        let html = state_page(&format!("[{}]", entries.join(",")));
        assert_eq!(parse_listings(&html).len(), 30);
    }

    #[test]
    fn test_regex_fallback_caps_listings() {
        let mut blobs = Vec::new();
        for i in 0..30 {
            blobs.push(format!(r#"{{"title": "Bulk Fallback Item {i:02}", "price": 5}}"#));
        }
        let html = blobs.join(" ");
        assert_eq!(parse_listings(&html).len(), MAX_LISTINGS);
    }
}
