//! `dealscope search` — live search: clean the title, fetch the results
//! page, parse and rank.

use crate::catalog::SourceProduct;
use crate::cli::output;
use crate::lexicon::Lexicon;
use crate::search::client::SearchClient;
use anyhow::Result;

pub async fn run(title: &str, price: f64, timeout_ms: u64) -> Result<()> {
    let source = SourceProduct::new(title, price);
    let client = SearchClient::new(timeout_ms);
    let outcome = client.search(Lexicon::embedded(), &source).await?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "source": source,
            "query": outcome.query,
            "url": outcome.url,
            "total": outcome.candidates.len(),
            "candidates": outcome.candidates,
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!("  Searched: {}", outcome.query);
        eprintln!("  URL:      {}", outcome.url);
        eprintln!();
        if outcome.candidates.is_empty() {
            eprintln!("  No candidates above threshold.");
        } else {
            for c in &outcome.candidates {
                let marker = if source.price > 0.0 && c.product.price < source.price {
                    "↓"
                } else {
                    " "
                };
                eprintln!(
                    "    {:>5.2} {marker} {:<56} ${:.2}",
                    c.score, c.product.title, c.product.price
                );
            }
        }
    }

    Ok(())
}
