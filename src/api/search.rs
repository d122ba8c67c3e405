use super::PloneClient;
use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `@querystring-search` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    /// Criteria list as stored in the block (`[{i, o, v}, ...]`)
    pub query: Value,
    pub b_start: u32,
    pub b_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    pub metadata_fields: &'static str,
}

impl SearchQuery {
    pub fn new(query: Value, b_start: u32, b_size: u32) -> Self {
        Self {
            query,
            b_start,
            b_size,
            sort_on: None,
            sort_order: None,
            limit: None,
            metadata_fields: "_all",
        }
    }
}

/// A catalog brain returned by a search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingItem {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type", default)]
    pub kind: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub effective: Option<String>,

    #[serde(default)]
    pub image_field: Option<String>,
}

impl ListingItem {
    /// Whether the item carries a lead image
    pub fn has_image(&self) -> bool {
        self.image_field.as_deref().is_some_and(|field| !field.is_empty())
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub items: Vec<ListingItem>,

    #[serde(default)]
    items_total: Option<u64>,

    #[serde(default)]
    total: Option<u64>,

    #[serde(default)]
    pub batching: Option<Value>,
}

impl SearchResults {
    pub fn new(items: Vec<ListingItem>, total: u64) -> Self {
        Self {
            items,
            items_total: Some(total),
            total: None,
            batching: None,
        }
    }

    /// Total number of matches across all pages (`items_total`, else `total`).
    pub fn total(&self) -> u64 {
        self.items_total
            .or(self.total)
            .unwrap_or(self.items.len() as u64)
    }
}

impl PloneClient {
    /// Run a catalog query in the context of `context_path`.
    pub async fn querystring_search(
        &self,
        context_path: &str,
        query: &SearchQuery,
    ) -> Result<SearchResults, GatewayError> {
        let url = format!("{}/@querystring-search", self.endpoint(context_path));
        self.post_json(&url, query).await
    }
}
