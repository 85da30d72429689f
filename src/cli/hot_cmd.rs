//! `dealscope hot` — rank a curated hot-list file against a source product.

use crate::catalog::SourceProduct;
use crate::cli::output;
use crate::hotlist::HotList;
use crate::lexicon::Lexicon;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(title: &str, price: f64, hotlist_path: &Path, max_results: usize) -> Result<()> {
    let text = std::fs::read_to_string(hotlist_path)
        .with_context(|| format!("failed to read {}", hotlist_path.display()))?;
    let list = HotList::from_json(&text)?;
    let source = SourceProduct::new(title, price);
    let ranked = list.rank(Lexicon::embedded(), &source, max_results);

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "source": source,
            "total": ranked.len(),
            "items": ranked,
        }));
        return Ok(());
    }

    if ranked.is_empty() {
        if !output::is_quiet() {
            eprintln!("  No curated items relevant to this product.");
        }
        return Ok(());
    }

    if !output::is_quiet() {
        for r in &ranked {
            eprintln!(
                "    {:>4.2}  {:<48} ${:.2} (was ${:.2})",
                r.relevance, r.item.title, r.item.price, r.item.original_price
            );
        }
    }

    Ok(())
}
