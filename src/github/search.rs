// src/github/search.rs
// =============================================================================
// This module fetches repository search results from GitHub.
//
// Strategy:
// - GET /search/repositories?q=<keyword>&sort=forks&order=desc
// - GitHub returns at most 100 items per page, so larger limits need
//   several requests (page=1, page=2, ...)
// - Pages are requested one at a time and appended in order
//
// Pagination stops as soon as one of these holds:
// - we have collected `limit` items
// - a page came back shorter than `per_page` (or empty)
// - we have collected everything GitHub says exists (`total_count`)
//
// `per_page` stays the same for every page of a search. Shrinking it on the
// last page would shift GitHub's page offsets and skip results.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// GitHub's maximum page size for the search API
const MAX_PER_PAGE: u32 = 100;

const SEARCH_PATH: &str = "search/repositories";

const USER_AGENT: &str = concat!("poll-git/", env!("CARGO_PKG_VERSION"));

/// What to search for: a keyword and how many repositories we want back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    keyword: String,
    limit: u32,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>, limit: u32) -> Self {
        Self {
            keyword: keyword.into(),
            limit,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Page size used for every request of this search
    pub fn per_page(&self) -> u32 {
        self.limit.clamp(1, MAX_PER_PAGE)
    }
}

// One page of the raw search response.
// Only the fields we read are declared; serde ignores the rest.
#[derive(Debug, Deserialize)]
struct PageResult {
    total_count: u64,
    #[serde(default)]
    incomplete_results: bool,
    items: Vec<Value>,
}

/// All pages of a search merged together
///
/// `items` are the raw repository objects in the order GitHub returned
/// them (descending fork count), already cut down to the requested limit.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<Value>,
}

/// Unauthenticated client for the repository-search endpoint
pub struct SearchClient {
    client: Client,
    endpoint: Url,
}

impl SearchClient {
    /// Creates a client for the API rooted at `api_url`
    /// (normally "https://api.github.com")
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends in '/'
        let base = format!("{}/", api_url.trim_end_matches('/'));
        let endpoint = Url::parse(&base)
            .and_then(|base| base.join(SEARCH_PATH))
            .with_context(|| format!("Invalid API URL: {}", api_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }

    // Runs the search, requesting as many pages as `request.limit()` needs
    //
    // Parameters:
    //   request: keyword and limit; per_page is derived from the limit
    //
    // Returns: Result<SearchResults>
    //   Success: items from every page fetched, in order, at most `limit`
    //   Error: first failed request, bad status, or unparsable page
    //
    // Pages are awaited one at a time; page N+1 is only requested after
    // page N has been merged.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        let limit = request.limit() as usize;
        let per_page = request.per_page() as usize;

        let mut results = SearchResults {
            items: Vec::with_capacity(limit),
            ..SearchResults::default()
        };
        let mut page = 1;

        loop {
            let page_result = self.fetch_page(request, page).await?;
            let received = page_result.items.len();

            info!(
                page,
                received,
                total_count = page_result.total_count,
                "fetched search page"
            );

            if page_result.incomplete_results {
                debug!(page, "GitHub reported incomplete search results");
                results.incomplete_results = true;
            }

            results.total_count = page_result.total_count;
            results.items.extend(page_result.items);

            let collected = results.items.len();
            if collected >= limit
                || received < per_page
                || collected as u64 >= results.total_count
            {
                break;
            }

            page += 1;
        }

        results.items.truncate(limit);
        debug!(
            keyword = request.keyword(),
            pages = page,
            items = results.items.len(),
            "search finished"
        );

        Ok(results)
    }

    /// Builds the URL for one page of a search
    fn page_url(&self, request: &SearchRequest, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", request.keyword())
            .append_pair("sort", "forks")
            .append_pair("order", "desc")
            .append_pair("per_page", &request.per_page().to_string())
            .append_pair("page", &page.to_string());
        url
    }

    // Fetches and parses one page of results
    //
    // Parameters:
    //   request: the search being run
    //   page: 1-based page number
    //
    // Returns: the raw page, or an error with the page number as context
    async fn fetch_page(&self, request: &SearchRequest, page: u32) -> Result<PageResult> {
        let url = self.page_url(request, page);
        debug!(%url, "requesting search page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GitHub search request failed (page {})", page))?;

        let response = check_status(response).await?;

        response
            .json::<PageResult>()
            .await
            .with_context(|| format!("Failed to parse GitHub search response (page {})", page))
    }
}

// Turns a non-2xx response into an error.
//
// GitHub answers an exhausted anonymous quota with 403 (sometimes 429) and
// x-ratelimit-remaining: 0. We report when the quota resets but never wait.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let headers = response.headers().clone();
    let message = error_detail(response.text().await.map_err(|e| e.to_string()));

    let rate_limited = matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS)
        && header_str(&headers, "x-ratelimit-remaining") == Some("0");

    if rate_limited {
        let reset = header_str(&headers, "x-ratelimit-reset").unwrap_or("unknown");
        return Err(anyhow!(
            "GitHub API rate limit exceeded (HTTP {}), resets at unix time {}: {}",
            status.as_u16(),
            reset,
            message
        ));
    }

    Err(anyhow!(
        "GitHub search returned HTTP {}: {}",
        status.as_u16(),
        message
    ))
}

// Picks the most useful text out of an error response body
//
// GitHub error bodies look like {"message": "...", "documentation_url": "..."};
// anything else is shown as is. A body that could not be read or was empty
// is named as such so the error never ends in a bare colon.
fn error_detail(body: std::result::Result<String, String>) -> String {
    match body {
        Err(e) => format!("<unreadable body: {}>", e),
        Ok(body) if body.trim().is_empty() => "<empty body>".to_string(),
        Ok(body) => serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_string))
            .unwrap_or(body),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a loop instead of recursion?
//    - Each page is one iteration; the exit conditions sit in one place
//    - A surprising upstream response (say, an empty page) cannot make the
//      call stack grow, it just ends the loop
//
// 2. Why keep items as serde_json::Value?
//    - We pass most of each record through untouched
//    - A typed struct would need an Option for every field and would lose
//      the difference between "null" and "missing"
//
// 3. What does `with_context` do?
//    - It wraps an error with a message describing what we were doing
//    - Printing with {:#} shows the whole chain on one line:
//      "GitHub search request failed (page 2): error sending request ..."
//
// 4. Why clone the headers before reading the body?
//    - response.text() takes `response` by value
//    - After that call the headers are gone, so we copy them first
// -----------------------------------------------------------------------------
