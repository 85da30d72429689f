//! Curated hot-list matching.
//!
//! Besides live search, the comparison surface shows a small curated list
//! of aggressively-discounted items. Those are maintained out-of-band as a
//! JSON document and matched to the source product with a coarser policy
//! than the live scorer: category keywords and tags matter more than exact
//! title overlap, because curated titles are short and promotional.

use crate::catalog::SourceProduct;
use crate::lexicon::Lexicon;
use crate::matching::similarity;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Relevance below which a curated item is not worth showing.
pub const HOT_ITEM_THRESHOLD: f64 = 0.3;

/// One curated deal. Field names follow the upstream JSON document
/// (camelCase, produced by the affiliate tooling).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotItem {
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub affiliate_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u64,
    #[serde(default)]
    pub savings: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A hot item paired with its relevance to the current source product.
#[derive(Debug, Clone, Serialize)]
pub struct RankedHotItem {
    #[serde(flatten)]
    pub item: HotItem,
    pub relevance: f64,
}

/// The curated list as shipped: `{ "hotItems": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotList {
    #[serde(rename = "hotItems", default)]
    pub items: Vec<HotItem>,
}

impl HotList {
    /// Parse a hot-list JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse hot-list JSON")
    }

    /// Rank curated items by relevance to `source`, drop everything below
    /// [`HOT_ITEM_THRESHOLD`], keep at most `max_results`.
    pub fn rank(
        &self,
        lex: &Lexicon,
        source: &SourceProduct,
        max_results: usize,
    ) -> Vec<RankedHotItem> {
        let mut ranked: Vec<RankedHotItem> = self
            .items
            .iter()
            .map(|item| RankedHotItem {
                item: item.clone(),
                relevance: relevance(lex, item, source),
            })
            .filter(|r| r.relevance > HOT_ITEM_THRESHOLD)
            .collect();
        ranked.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(max_results);
        ranked
    }
}

/// Curated-item relevance: category keywords 0.3, tag overlap 0.25,
/// price band 0.25, fuzzy title overlap 0.2.
pub fn relevance(lex: &Lexicon, item: &HotItem, source: &SourceProduct) -> f64 {
    let title = source.title.to_lowercase();

    0.3 * category_keyword_match(lex, &item.category, &title)
        + 0.25 * tag_match(&item.tags, &title)
        + 0.25 * price_band_score(item.price, source.price)
        + 0.2 * similarity::bidirectional_overlap(&item.title, &title)
}

/// Fraction of the category's keyword list found in the source title.
fn category_keyword_match(lex: &Lexicon, category: &str, title: &str) -> f64 {
    let keywords = lex.keywords_for(category);
    if keywords.is_empty() {
        return 0.0;
    }
    let hits = keywords.iter().filter(|k| title.contains(k.as_str())).count();
    hits as f64 / keywords.len() as f64
}

/// Fraction of the item's tags found in the source title.
fn tag_match(tags: &[String], title: &str) -> f64 {
    if tags.is_empty() {
        return 0.0;
    }
    let hits = tags
        .iter()
        .filter(|t| title.contains(t.to_lowercase().as_str()))
        .count();
    hits as f64 / tags.len() as f64
}

/// Price plausibility for a curated item.
///
/// 1.0 inside the 20–80% band of the source price; a linear penalty with
/// slope 2 on either side (too close to the source price is a weak deal,
/// too far below it smells like a different product). Unknown source
/// price is neutral, 0.5.
fn price_band_score(item_price: f64, source_price: f64) -> f64 {
    if source_price <= 0.0 {
        return 0.5;
    }
    let ratio = item_price / source_price;
    if (0.2..=0.8).contains(&ratio) {
        1.0
    } else if ratio > 0.8 {
        (1.0 - (ratio - 0.8) * 2.0).max(0.0)
    } else {
        (1.0 - (0.2 - ratio) * 2.0).max(0.0)
    }
}
