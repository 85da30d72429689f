//! `dealscope parse <file>` — extract listing candidates from a saved
//! search-results page.

use crate::cli::output;
use crate::search::listing;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(html_path: &Path) -> Result<()> {
    let html = std::fs::read_to_string(html_path)
        .with_context(|| format!("failed to read {}", html_path.display()))?;
    let listings = listing::parse_listings(&html);

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "file": html_path.display().to_string(),
            "total": listings.len(),
            "listings": listings,
        }));
        return Ok(());
    }

    if listings.is_empty() {
        if !output::is_quiet() {
            eprintln!("  No listings found — page layout may have changed.");
        }
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!("  {} listing(s):", listings.len());
        for l in &listings {
            eprintln!("    ${:>8.2}  {}", l.price, l.title);
        }
    }

    Ok(())
}
