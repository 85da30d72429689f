//! Heuristic product matching: attribute extraction, title similarity, and
//! the relevance scorer that ranks marketplace candidates against a source
//! product.

pub mod attributes;
pub mod scorer;
pub mod similarity;

pub use scorer::{find_best_match, rank_candidates, ScoringPolicy};
