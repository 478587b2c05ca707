// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, stdout is reserved for the report)
// 2. Parse command-line arguments using clap
// 3. Check that the limit is within 1-1000
// 4. Search GitHub, trim the results and print the JSON report
// 5. Exit with proper code (0 = success, 1 = bad limit, 2 = error)
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing
mod github;        // src/github/ - GitHub search client
mod report;        // src/report/ - field filtering and report output

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use github::{SearchClient, SearchRequest};
use std::io::Write;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logger();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    let exit_code = match run(cli, &mut stdout).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr; RUST_LOG overrides the default "warn" level
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Runs one search and writes the report to `out`
// Returns:
//   Ok(0) = report printed
//   Ok(1) = limit out of range, nothing requested
//   Err   = request or parsing failure
async fn run(cli: Cli, out: &mut impl Write) -> Result<i32> {
    let limit = match cli.validated_limit() {
        Some(limit) => limit,
        None => {
            writeln!(out, "{}", cli::limit_error_message(cli.limit.as_str()))?;
            return Ok(1);
        }
    };

    let request = SearchRequest::new(cli.keyword, limit);
    let client = SearchClient::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))?;

    info!(keyword = request.keyword(), limit, "searching GitHub repositories");
    let results = client.search(&request).await?;
    if results.incomplete_results {
        warn!("GitHub timed out on part of the search, the list may be missing repositories");
    }

    let report = report::build_report(request.keyword(), request.limit(), results);
    writeln!(out, "{}", report.to_pretty_json()?)?;

    Ok(0)
}
