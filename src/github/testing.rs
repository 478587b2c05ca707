// src/github/testing.rs
// =============================================================================
// Canned search responses shared by the tests of every module.
//
// Records carry the same extra fields GitHub sends (full_name, node_id,
// avatar_url, ...) so the tests can see them being stripped.
// =============================================================================

use serde_json::{json, Value};

/// A repository record shaped like one item of GitHub's search response
pub fn repo_json(id: u64) -> Value {
    // every other record has no description, as happens upstream
    let description = if id % 2 == 0 {
        Value::Null
    } else {
        json!("a distributed log")
    };

    json!({
        "id": id,
        "node_id": format!("R_{}", id),
        "name": format!("repo-{}", id),
        "full_name": format!("owner-{}/repo-{}", id, id),
        "private": false,
        "description": description,
        "language": "Rust",
        "created_at": "2019-04-01T12:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "html_url": format!("https://github.com/owner-{}/repo-{}", id, id),
        "watchers_count": 10 + id,
        "stargazers_count": 10 + id,
        "forks_count": 10_000 - id,
        "score": 1.0,
        "owner": {
            "login": format!("owner-{}", id),
            "id": 500 + id,
            "url": format!("https://api.github.com/users/owner-{}", id),
            "avatar_url": "https://avatars.githubusercontent.com/u/1",
            "type": "User",
            "site_admin": false
        }
    })
}

/// A search page body holding records `start..start + count`
pub fn page_body(total_count: u64, start: u64, count: u64) -> String {
    let items: Vec<Value> = (start..start + count).map(repo_json).collect();
    json!({
        "total_count": total_count,
        "incomplete_results": false,
        "items": items
    })
    .to_string()
}
