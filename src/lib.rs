// Copyright 2026 Dealscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dealscope library — cross-marketplace product matching.
//!
//! Given a product seen on one marketplace (title + price), find and rank
//! comparable listings on a second marketplace. The matching core is pure
//! and synchronous — strings and numbers in, scores out — with an async
//! search client layered on top for fetching live result pages.

pub mod catalog;
pub mod cli;
pub mod hotlist;
pub mod lexicon;
pub mod matching;
pub mod query;
pub mod search;

pub use catalog::{CandidateProduct, ScoredCandidate, SourceProduct};
pub use lexicon::Lexicon;
pub use matching::{find_best_match, rank_candidates, ScoringPolicy};
