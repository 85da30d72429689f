//! `dealscope match` — rank a JSON file of candidates against a source
//! product, offline.

use crate::catalog::{CandidateProduct, SourceProduct};
use crate::cli::output;
use crate::lexicon::Lexicon;
use crate::matching::{find_best_match, rank_candidates, ScoringPolicy};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Accepted candidate-file shapes: a bare array, or `{"candidates": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateFile {
    Bare(Vec<CandidateProduct>),
    Wrapped { candidates: Vec<CandidateProduct> },
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    title: &str,
    price: f64,
    candidates_path: &Path,
    simple: bool,
    best_only: bool,
    min_score: Option<f64>,
    specificity: f64,
) -> Result<()> {
    let lex = Lexicon::embedded();
    let source = SourceProduct::new(title, price);

    let text = std::fs::read_to_string(candidates_path)
        .with_context(|| format!("failed to read {}", candidates_path.display()))?;
    let candidates = match serde_json::from_str::<CandidateFile>(&text)
        .context("candidates file is not valid JSON")?
    {
        CandidateFile::Bare(c) | CandidateFile::Wrapped { candidates: c } => c,
    };

    if best_only {
        let best = find_best_match(lex, &source, candidates);
        if output::is_json() {
            output::print_json(&serde_json::json!({
                "source": source,
                "best": best,
            }));
        } else if let Some(b) = best {
            if !output::is_quiet() {
                eprintln!("  Best match ({:.2}): {} — ${:.2}", b.score, b.product.title, b.product.price);
            }
        } else if !output::is_quiet() {
            eprintln!("  No match found.");
        }
        return Ok(());
    }

    let policy = if simple {
        ScoringPolicy::Simple
    } else {
        ScoringPolicy::Weighted
    };
    let ranked = rank_candidates(lex, policy, &source, candidates, specificity, min_score);

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "source": source,
            "policy": format!("{policy:?}"),
            "total": ranked.len(),
            "candidates": ranked,
        }));
        return Ok(());
    }

    if ranked.is_empty() {
        if !output::is_quiet() {
            eprintln!("  No candidates above threshold.");
        }
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!("  {} candidate(s), best first:", ranked.len());
        eprintln!();
        for c in &ranked {
            let truncated = truncate_title(&c.product.title, 56);
            eprintln!("    {:>5.2}  {:<56} ${:.2}", c.score, truncated, c.product.price);
        }
    }

    Ok(())
}

/// Truncate a title to `max_chars` characters with a `...` tail. Counts
/// chars, not bytes: marketplace titles routinely carry `™`, accents, and
/// emoji, and a byte slice could land mid-codepoint.
fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() > max_chars {
        let head: String = title.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_title_short_passthrough() {
        assert_eq!(truncate_title("Desk Lamp", 56), "Desk Lamp");
    }

    #[test]
    fn test_truncate_title_multibyte_at_cut_point() {
        // A two-byte char straddling the cut must not split a codepoint.
        let title = format!("{}é{}", "x".repeat(52), "y".repeat(10));
        let out = truncate_title(&title, 56);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 56);
        assert!(out.contains('é'));
    }

    #[test]
    fn test_truncate_title_emoji_heavy() {
        let title = "🎧".repeat(60);
        let out = truncate_title(&title, 56);
        assert_eq!(out.chars().count(), 56);
    }
}
