// Copyright 2026 Dealscope Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dealscope::cli;
use dealscope::cli::output;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dealscope",
    about = "Dealscope — find a cheaper comparable product on another marketplace",
    version,
    after_help = "Run 'dealscope <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the search query and progressive query ladder for a title
    Query {
        /// Product title as scraped from the source marketplace
        title: String,
        /// Maximum number of tokens kept in the query
        #[arg(long, default_value = "6")]
        max_tokens: usize,
    },
    /// Rank a JSON file of candidate products against a source product
    Match {
        /// Source product title
        title: String,
        /// Source product price in dollars
        #[arg(long, default_value = "0")]
        price: f64,
        /// Path to the candidates file (JSON array or {"candidates": [...]})
        #[arg(long)]
        candidates: PathBuf,
        /// Use the simple two-factor policy instead of the weighted one
        #[arg(long)]
        simple: bool,
        /// Print only the single best match (simple policy)
        #[arg(long)]
        best: bool,
        /// Drop candidates scoring below this threshold
        #[arg(long)]
        min_score: Option<f64>,
        /// Query specificity in [0,1] from the progressive pipeline
        #[arg(long, default_value = "0")]
        specificity: f64,
    },
    /// Extract listing candidates from a saved search-results page
    Parse {
        /// Path to the saved HTML file
        file: PathBuf,
    },
    /// Live search: fetch the results page and rank its listings
    Search {
        /// Source product title
        title: String,
        /// Source product price in dollars
        #[arg(long, default_value = "0")]
        price: f64,
        /// Request timeout in milliseconds
        #[arg(long, default_value = "10000")]
        timeout: u64,
    },
    /// Rank a curated hot-list JSON file against a source product
    Hot {
        /// Source product title
        title: String,
        /// Source product price in dollars
        #[arg(long, default_value = "0")]
        price: f64,
        /// Path to the hot-list JSON document
        #[arg(long)]
        hotlist: PathBuf,
        /// Maximum number of items to show
        #[arg(long, default_value = "3")]
        max_results: usize,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    output::init(cli.json, cli.quiet);

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("dealscope=debug".parse()?),
            )
            .init();
    }

    let result = match cli.command {
        Commands::Query { title, max_tokens } => cli::query_cmd::run(&title, max_tokens),
        Commands::Match {
            title,
            price,
            candidates,
            simple,
            best,
            min_score,
            specificity,
        } => cli::match_cmd::run(&title, price, &candidates, simple, best, min_score, specificity),
        Commands::Parse { file } => cli::parse_cmd::run(&file),
        Commands::Search {
            title,
            price,
            timeout,
        } => cli::search_cmd::run(&title, price, timeout).await,
        Commands::Hot {
            title,
            price,
            hotlist,
            max_results,
        } => cli::hot_cmd::run(&title, price, &hotlist, max_results),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "dealscope", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !output::is_quiet() && !output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if output::is_json() {
            output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
