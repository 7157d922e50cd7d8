use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::AppError;

/// One entry of the public API listing.
///
/// Only `Category` is interpreted; every other field is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEntry {
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct EntriesResponse {
    entries: Vec<ApiEntry>,
}

/// Fetches the upstream entry list
pub struct DataProxy {
    client: Client,
    url: String,
}

impl DataProxy {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub async fn fetch_entries(&self) -> Result<Vec<ApiEntry>, AppError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::UpstreamFailure(e.to_string()))?;

        let body: EntriesResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamFailure(e.to_string()))?;

        debug!("Fetched {} entries from {}", body.entries.len(), self.url);
        Ok(body.entries)
    }
}

/// Keep entries whose category matches case-insensitively, then truncate to `limit`.
///
/// An empty `category` is treated as absent.
pub fn filter_entries(
    entries: Vec<ApiEntry>,
    category: Option<&str>,
    limit: Option<usize>,
) -> Vec<ApiEntry> {
    let category = category.filter(|c| !c.is_empty()).map(str::to_lowercase);

    entries
        .into_iter()
        .filter(|entry| {
            category
                .as_deref()
                .is_none_or(|wanted| entry.category.to_lowercase() == wanted)
        })
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries() -> Vec<ApiEntry> {
        serde_json::from_value(json!([
            { "API": "Cat Facts", "Category": "Animals", "HTTPS": true },
            { "API": "Dogs", "Category": "animals", "HTTPS": true },
            { "API": "Open Library", "Category": "Books", "HTTPS": true },
            { "API": "Axolotl", "Category": "ANIMALS", "HTTPS": false },
        ]))
        .unwrap()
    }

    fn names(entries: &[ApiEntry]) -> Vec<&str> {
        entries
            .iter()
            .map(|e| e.fields["API"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_no_filters_returns_everything() {
        assert_eq!(filter_entries(entries(), None, None).len(), 4);
        assert_eq!(filter_entries(entries(), Some(""), None).len(), 4);
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let filtered = filter_entries(entries(), Some("aNiMaLs"), None);
        assert_eq!(names(&filtered), vec!["Cat Facts", "Dogs", "Axolotl"]);

        assert!(filter_entries(entries(), Some("weather"), None).is_empty());
    }

    #[test]
    fn test_limit_applies_after_filter() {
        let filtered = filter_entries(entries(), Some("animals"), Some(2));
        assert_eq!(names(&filtered), vec!["Cat Facts", "Dogs"]);

        assert!(filter_entries(entries(), None, Some(0)).is_empty());
        assert_eq!(filter_entries(entries(), None, Some(100)).len(), 4);
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let entry = &filter_entries(entries(), Some("books"), None)[0];
        let value = serde_json::to_value(entry).unwrap();
        assert_eq!(
            value,
            json!({ "API": "Open Library", "Category": "Books", "HTTPS": true })
        );
    }
}
