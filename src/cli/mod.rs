//! CLI subcommand implementations for the dealscope binary.

pub mod hot_cmd;
pub mod match_cmd;
pub mod output;
pub mod parse_cmd;
pub mod query_cmd;
pub mod search_cmd;
