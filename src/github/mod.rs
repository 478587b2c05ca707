// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub repository-search API.
//
// Currently implements:
// - Building search URLs with the keyword and sort qualifiers
// - Fetching pages sequentially until the requested limit is reached
// - Reporting HTTP and rate-limit failures with context
// =============================================================================

mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use search::{SearchClient, SearchRequest, SearchResults};
