// src/report/filter.rs
// =============================================================================
// Allow-list filtering of repository records.
//
// GitHub sends ~80 fields per repository. We keep a fixed handful and build
// a fresh object from them; the source record is never modified.
//
// Keys are only copied, never invented: if GitHub omits an allowed key the
// trimmed record omits it too. A key that is present with a null value
// (e.g. a repository without a description) stays null.
// =============================================================================

use serde_json::{Map, Value};

/// Fields kept on every repository record
pub const REPOSITORY_KEYS: &[&str] = &[
    "id",
    "name",
    "description",
    "language",
    "created_at",
    "html_url",
    "watchers_count",
    "forks_count",
    "owner",
];

/// Fields kept on the nested `owner` object
pub const OWNER_KEYS: &[&str] = &["login", "id", "url"];

/// Returns a copy of `record` holding only the keys listed in `allowed`
///
/// Non-object values are returned unchanged.
pub fn filter_fields(record: &Value, allowed: &[&str]) -> Value {
    match record {
        Value::Object(fields) => {
            let kept: Map<String, Value> = fields
                .iter()
                .filter(|(key, _)| allowed.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            Value::Object(kept)
        }
        other => other.clone(),
    }
}

/// Trims a repository record and its `owner` to the allow-listed fields
pub fn trim_repository(record: &Value) -> Value {
    let mut trimmed = filter_fields(record, REPOSITORY_KEYS);

    if let Some(owner) = trimmed.get_mut("owner") {
        // owner may be null for some search hits; leave it as is then
        *owner = filter_fields(owner, OWNER_KEYS);
    }

    trimmed
}
