// src/report/mod.rs
// =============================================================================
// This module turns raw search results into the JSON report we print.
//
// Submodules:
// - filter: keeps only the allow-listed fields of each repository record
//
// The report looks like:
//   {
//       "keyword": "raft",
//       "repository_limit": 1,
//       "total_repositories": 42,
//       "repo_list": [ ... ]
//   }
// =============================================================================

mod filter;

use filter::trim_repository;

#[cfg(test)]
pub(crate) use filter::{OWNER_KEYS, REPOSITORY_KEYS};

use crate::github::SearchResults;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// The document printed on stdout
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Keyword that was searched for
    pub keyword: String,
    /// Number of repositories the user asked for
    pub repository_limit: u32,
    /// Number of matching repositories GitHub knows about
    pub total_repositories: u64,
    /// Trimmed repositories, most forked first
    pub repo_list: Vec<Value>,
}

// Builds the report from merged search pages
//
// Parameters:
//   keyword: the keyword that was searched for
//   limit: the validated limit the user asked for
//   results: merged pages from SearchClient::search
//
// Returns: Report whose repo_list holds a trimmed copy of every item,
// in the order GitHub returned them
pub fn build_report(keyword: &str, limit: u32, results: SearchResults) -> Report {
    Report {
        keyword: keyword.to_string(),
        repository_limit: limit,
        total_repositories: results.total_count,
        repo_list: results.items.iter().map(trim_repository).collect(),
    }
}

impl Report {
    /// Serializes the report as JSON indented with four spaces
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .context("Failed to serialize report")?;
        String::from_utf8(buf).context("Report is not valid UTF-8")
    }
}
