// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   poll_git <KEYWORD> <LIMIT> [--api-url URL] [--timeout-secs N]
//
// The limit accepts any integer on purpose: clap should let "0", "-5" or
// "99999999999999999999" through so that our own range check can report
// them the same way it reports "1001".
// =============================================================================

use clap::Parser;
use std::ops::RangeInclusive;

/// Default endpoint for the GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Allowed number of repositories in a report
pub const LIMIT_RANGE: RangeInclusive<i64> = 1..=1000;

#[derive(Parser, Debug)]
#[command(
    name = "poll_git",
    version = "0.1.0",
    about = "List the most-forked GitHub repositories matching a keyword as JSON",
    long_about = "poll_git searches GitHub for repositories containing a keyword, ordered by \
                  fork count (descending), and prints the top results as a JSON document. \
                  Requests are unauthenticated, so GitHub's anonymous rate limit applies."
)]
pub struct Cli {
    /// Keyword used as the search qualifier
    pub keyword: String,

    /// Number of repositories to list (1-1000)
    #[arg(allow_negative_numbers = true, value_parser = parse_limit)]
    pub limit: LimitArg,

    /// Base URL of the GitHub API
    #[arg(long, env = "POLL_GIT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "POLL_GIT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// The limit exactly as typed, plus its value when it fits in an i64
///
/// Integers too wide for i64 are still valid input; they are simply
/// outside [`LIMIT_RANGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitArg {
    text: String,
    value: Option<i64>,
}

impl LimitArg {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }
}

// Accepts an optional sign followed by one or more ASCII digits
//
// Parameters:
//   raw: the command-line argument
//
// Returns: LimitArg, or an error message clap shows for non-integers
fn parse_limit(raw: &str) -> Result<LimitArg, String> {
    let digits = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{}' is not an integer", raw));
    }

    Ok(LimitArg {
        text: raw.to_string(),
        value: raw.parse::<i64>().ok(),
    })
}

impl Cli {
    /// Returns the limit when it is inside [`LIMIT_RANGE`]
    pub fn validated_limit(&self) -> Option<u32> {
        self.limit
            .value()
            .filter(|limit| LIMIT_RANGE.contains(limit))
            .and_then(|limit| u32::try_from(limit).ok())
    }
}

/// Message printed when the limit is outside [`LIMIT_RANGE`]
pub fn limit_error_message(limit: &str) -> String {
    format!(
        "ERROR: limit [{}] is not in the range {}-{}",
        limit,
        LIMIT_RANGE.start(),
        LIMIT_RANGE.end()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_args() {
        let cli = Cli::try_parse_from(["poll_git", "raft", "25"]).unwrap();
        assert_eq!(cli.keyword, "raft");
        assert_eq!(cli.limit.as_str(), "25");
        assert_eq!(cli.limit.value(), Some(25));
        assert_eq!(cli.validated_limit(), Some(25));
    }

    #[test]
    fn test_parse_api_url_flag() {
        let cli = Cli::try_parse_from([
            "poll_git",
            "raft",
            "1",
            "--api-url",
            "http://127.0.0.1:9999",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_parse_timeout_flag() {
        let cli =
            Cli::try_parse_from(["poll_git", "raft", "1", "--timeout-secs", "5"]).unwrap();
        assert_eq!(cli.timeout_secs, 5);
    }

    #[test]
    fn test_limit_bounds() {
        for (limit, expected) in [
            ("0", None),
            ("1", Some(1)),
            ("1000", Some(1000)),
            ("1001", None),
            ("-5", None),
            ("+7", Some(7)),
            ("99999999999999999999", None),
            ("-99999999999999999999", None),
        ] {
            let cli = Cli::try_parse_from(["poll_git", "kv-store", limit]).unwrap();
            assert_eq!(cli.validated_limit(), expected, "limit {}", limit);
        }
    }

    #[test]
    fn test_wide_limit_reaches_range_check() {
        let cli = Cli::try_parse_from(["poll_git", "raft", "99999999999999999999"]).unwrap();
        assert_eq!(cli.limit.value(), None);
        assert_eq!(cli.validated_limit(), None);
        assert_eq!(
            limit_error_message(cli.limit.as_str()),
            "ERROR: limit [99999999999999999999] is not in the range 1-1000"
        );
    }

    #[test]
    fn test_non_integer_limit_rejected_by_clap() {
        for limit in ["ten", "", "-", "1.5", "12a"] {
            assert!(
                Cli::try_parse_from(["poll_git", "raft", limit]).is_err(),
                "limit {:?}",
                limit
            );
        }
    }

    #[test]
    fn test_limit_error_message() {
        assert_eq!(
            limit_error_message("1001"),
            "ERROR: limit [1001] is not in the range 1-1000"
        );
    }
}
