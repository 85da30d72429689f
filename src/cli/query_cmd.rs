//! `dealscope query <title>` — show the cleaned query and the progressive
//! ladder for a product title.

use crate::cli::output;
use crate::lexicon::Lexicon;
use crate::query::{build_search_query, progressive};
use crate::search::url::build_search_url;
use anyhow::Result;

pub fn run(title: &str, max_tokens: usize) -> Result<()> {
    let lex = Lexicon::embedded();
    let cleaned = build_search_query(lex, title, max_tokens.max(1));
    let ladder = progressive::generate(lex, title);
    let search_url = if cleaned.is_empty() {
        None
    } else {
        build_search_url(&cleaned).ok().map(|u| u.to_string())
    };

    if output::is_json() {
        let rungs: Vec<serde_json::Value> = ladder
            .iter()
            .map(|q| {
                serde_json::json!({
                    "query": q.query,
                    "specificity": q.specificity,
                    "label": q.label,
                })
            })
            .collect();
        output::print_json(&serde_json::json!({
            "title": title,
            "query": cleaned,
            "search_url": search_url,
            "ladder": rungs,
        }));
        return Ok(());
    }

    if cleaned.is_empty() {
        if !output::is_quiet() {
            eprintln!("  Title reduces to an empty query — no search possible.");
        }
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!("  Query: {cleaned}");
        if let Some(url) = &search_url {
            eprintln!("  URL:   {url}");
        }
        eprintln!();
        eprintln!("  Progressive ladder:");
        for rung in &ladder {
            eprintln!(
                "    {:>4.2}  {:<28} {}",
                rung.specificity, rung.label, rung.query
            );
        }
    }

    Ok(())
}
