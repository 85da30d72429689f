//! Relevance scoring for (source, candidate) product pairs.
//!
//! Two scoring policies coexist because they serve different call paths:
//!
//! * [`ScoringPolicy::Weighted`] — the full four-factor score used when
//!   ranking a whole result page: title overlap, price savings, attribute
//!   confidence, and an optional query-specificity bonus supplied by the
//!   progressive search pipeline.
//! * [`ScoringPolicy::Simple`] — a two-factor score (title containment
//!   0.7, price advantage 0.3) used when a single best candidate is wanted
//!   fast. It uses a different similarity measure, so it is *not* a
//!   degenerate weighted score and the two are deliberately kept apart.
//!
//! # Confidence model
//!
//! The confidence term sums five independent attribute signals whose
//! weights total 1.0: brand match 0.30, model-number match 0.25,
//! storage-spec match 0.15, price ratio inside `[0.2, 0.8]` 0.20,
//! category match 0.10.
//!
//! # Score range
//!
//! The final score is monotonic (higher is better) but **not clamped** to
//! `[0, 1]`: the savings ratio and the specificity bonus can push a great
//! candidate slightly past 1.0. Clamping would collapse distinct scores at
//! the cap and reorder ties, so callers get the raw value and must not
//! assume a hard upper bound.

use crate::catalog::{CandidateProduct, ScoredCandidate, SourceProduct};
use crate::lexicon::Lexicon;
use crate::matching::attributes;
use crate::matching::similarity;

// ── Weight constants ─────────────────────────────────────────────────────────

/// Weights of the four-factor policy. `specificity` multiplies the
/// caller-supplied query-specificity scalar, so the first three are the
/// only ones expected to sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub title: f64,
    pub savings: f64,
    pub confidence: f64,
    pub specificity: f64,
}

pub const WEIGHTED: Weights = Weights {
    title: 0.4,
    savings: 0.3,
    confidence: 0.3,
    specificity: 0.1,
};

/// Confidence sub-weights; sum to 1.0 so the confidence term is bounded.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceWeights {
    pub brand: f64,
    pub model: f64,
    pub storage: f64,
    pub price_band: f64,
    pub category: f64,
}

pub const CONFIDENCE: ConfidenceWeights = ConfidenceWeights {
    brand: 0.30,
    model: 0.25,
    storage: 0.15,
    price_band: 0.20,
    category: 0.10,
};

/// Plausible bargain band: a candidate priced at 20–80% of the source
/// price looks like the same product sold cheaper, not a knockoff or an
/// unrelated listing.
pub const PRICE_BAND: (f64, f64) = (0.2, 0.8);

// ── Scoring policies ─────────────────────────────────────────────────────────

/// Which scoring formula to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// Title overlap 0.4 + savings 0.3 + confidence 0.3 + specificity bonus.
    #[default]
    Weighted,
    /// Title containment 0.7 + price advantage 0.3.
    Simple,
}

impl ScoringPolicy {
    /// Score one candidate against the source product.
    ///
    /// `query_specificity` is the `[0, 1]` scalar produced by the
    /// progressive query pipeline; pass 0.0 outside that path. Only the
    /// weighted policy uses it.
    pub fn score(
        &self,
        lex: &Lexicon,
        source: &SourceProduct,
        candidate: &CandidateProduct,
        query_specificity: f64,
    ) -> f64 {
        match self {
            ScoringPolicy::Weighted => {
                let title = similarity::token_overlap(&source.title, &candidate.title);
                let savings = price_savings_ratio(source.price, candidate.price);
                let conf = confidence(lex, source, candidate);
                WEIGHTED.title * title
                    + WEIGHTED.savings * savings
                    + WEIGHTED.confidence * conf
                    + WEIGHTED.specificity * query_specificity
            }
            ScoringPolicy::Simple => {
                let title = similarity::containment_overlap(&source.title, &candidate.title);
                let advantage = price_savings_ratio(source.price, candidate.price);
                0.7 * title + 0.3 * advantage
            }
        }
    }
}

// ── Score components ─────────────────────────────────────────────────────────

/// Relative savings: `max(0, (source − candidate) / source)` when the
/// source price is known, else 0.0. Never negative, never NaN.
pub fn price_savings_ratio(source_price: f64, candidate_price: f64) -> f64 {
    if source_price > 0.0 {
        ((source_price - candidate_price) / source_price).max(0.0)
    } else {
        0.0
    }
}

/// Sum of attribute-match signals per the confidence model above.
pub fn confidence(lex: &Lexicon, source: &SourceProduct, candidate: &CandidateProduct) -> f64 {
    let mut conf = 0.0;

    let src_brand = attributes::extract_brand(lex, &source.title);
    let cand_brand = attributes::extract_brand(lex, &candidate.title);
    if let (Some(a), Some(b)) = (src_brand, cand_brand) {
        if a == b {
            conf += CONFIDENCE.brand;
        }
    }

    let src_model = attributes::extract_model_number(&source.title);
    let cand_model = attributes::extract_model_number(&candidate.title);
    if let (Some(a), Some(b)) = (src_model, cand_model) {
        if a == b {
            conf += CONFIDENCE.model;
        }
    }

    let src_storage = attributes::extract_storage_spec(&source.title);
    let cand_storage = attributes::extract_storage_spec(&candidate.title);
    if let (Some(a), Some(b)) = (src_storage, cand_storage) {
        if a == b {
            conf += CONFIDENCE.storage;
        }
    }

    if source.price > 0.0 && candidate.price > 0.0 {
        let ratio = candidate.price / source.price;
        if (PRICE_BAND.0..=PRICE_BAND.1).contains(&ratio) {
            conf += CONFIDENCE.price_band;
        }
    }

    let src_cat = attributes::extract_category(lex, &source.title);
    let cand_cat = attributes::extract_category(lex, &candidate.title);
    if let (Some(a), Some(b)) = (src_cat, cand_cat) {
        if a == b {
            conf += CONFIDENCE.category;
        }
    }

    conf
}

// ── Ranking and selection ────────────────────────────────────────────────────

/// Score every candidate and return them sorted by descending score.
///
/// The sort is stable: candidates with equal scores keep their input
/// order, so reranking the same list twice gives identical output.
/// `min_score` drops entries strictly below the threshold; the scorer
/// itself imposes no threshold — call sites pick their own (0.1 for live
/// search results, 0.3 for curated lists).
pub fn rank_candidates(
    lex: &Lexicon,
    policy: ScoringPolicy,
    source: &SourceProduct,
    candidates: Vec<CandidateProduct>,
    query_specificity: f64,
    min_score: Option<f64>,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|product| {
            let score = policy.score(lex, source, &product, query_specificity);
            ScoredCandidate { product, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(threshold) = min_score {
        scored.retain(|c| c.score >= threshold);
    }
    scored
}

/// Pick the single best candidate under the simple two-factor policy, or
/// `None` when the list is empty.
pub fn find_best_match(
    lex: &Lexicon,
    source: &SourceProduct,
    candidates: Vec<CandidateProduct>,
) -> Option<ScoredCandidate> {
    rank_candidates(lex, ScoringPolicy::Simple, source, candidates, 0.0, None)
        .into_iter()
        .next()
}
