//! Fetching the result pages of listing and search blocks.
//!
//! All paginated blocks of a page are queried concurrently before rendering
//! so views stay synchronous. A failed query only affects its own block.

use super::model::{BlockInstance, BlockKind, BlockTree};
use super::pagination::{paginated_blocks, PaginationContext};
use crate::api::{PloneClient, SearchQuery, SearchResults};
use futures::future::join_all;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};
use url::Url;

/// Request parameter carrying the search term of search blocks
pub const SEARCH_TEXT_PARAM: &str = "SearchableText";

const CONTAINS_OPERATION: &str = "plone.app.querystring.operation.string.contains";

/// One fetched (or failed) result page of a paginated block.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub page: u32,
    pub b_size: u32,
    pub limit: Option<u32>,
    /// `None` when the query failed
    pub results: Option<SearchResults>,
}

impl ListingPage {
    pub fn total_pages(&self) -> u32 {
        let Some(results) = &self.results else {
            return 0;
        };
        let mut total = results.total();
        if let Some(limit) = self.limit {
            total = total.min(u64::from(limit));
        }
        let pages = total.div_ceil(u64::from(self.b_size.max(1)));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

pub type PrefetchedListings = HashMap<String, ListingPage>;

/// Catalog query for one page of a listing or search block.
pub fn listing_query(
    block: &BlockInstance,
    page: u32,
    default_page_size: u32,
    url: &Url,
) -> SearchQuery {
    // Current blocks keep settings in `querystring`; older ones have a bare
    // criteria list in `query` and settings at the top level.
    let source = block.get("querystring").or_else(|| block.get("query"));
    let empty = Map::new();
    let (mut criteria, settings) = match source {
        Some(Value::Object(settings)) => (
            settings.get("query").cloned().unwrap_or_else(|| json!([])),
            settings,
        ),
        Some(criteria @ Value::Array(_)) => (criteria.clone(), &empty),
        _ => (json!([]), &empty),
    };

    let setting = |key: &str| settings.get(key).or_else(|| block.get(key));

    let b_size = setting("b_size")
        .and_then(as_count)
        .filter(|size| *size > 0)
        .unwrap_or(default_page_size.max(1));
    let b_start = page.saturating_sub(1).saturating_mul(b_size);

    if block.kind() == BlockKind::Search {
        let term = url
            .query_pairs()
            .find(|(name, _)| name == SEARCH_TEXT_PARAM)
            .map(|(_, value)| value.trim().to_string())
            .filter(|term| !term.is_empty());
        if let (Some(term), Value::Array(list)) = (term, &mut criteria) {
            list.push(json!({"i": SEARCH_TEXT_PARAM, "o": CONTAINS_OPERATION, "v": term}));
        }
    }

    let mut query = SearchQuery::new(criteria, b_start, b_size);
    query.sort_on = setting("sort_on")
        .and_then(Value::as_str)
        .filter(|sort_on| !sort_on.is_empty())
        .map(str::to_string);
    query.sort_order = match setting("sort_order") {
        Some(Value::String(order)) if !order.is_empty() => Some(order.clone()),
        _ if setting("sort_order_boolean").and_then(Value::as_bool) == Some(true) => {
            Some("descending".to_string())
        }
        _ => None,
    };
    query.limit = setting("limit").and_then(as_count).filter(|limit| *limit > 0);
    query
}

/// Non-negative count stored as a number or a numeric string
fn as_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Fetch the current page of every paginated block of `tree`.
pub async fn prefetch_listings(
    client: &PloneClient,
    tree: &BlockTree,
    pagination: &PaginationContext,
    url: &Url,
    context_path: &str,
    default_page_size: u32,
) -> PrefetchedListings {
    let requests: Vec<(String, u32, SearchQuery)> = paginated_blocks(&tree.blocks, tree.layout())
        .into_iter()
        .map(|(key, block)| {
            let page = pagination.current_page(url, &key);
            let query = listing_query(&block, page, default_page_size, url);
            (key, page, query)
        })
        .collect();

    if requests.is_empty() {
        return PrefetchedListings::new();
    }
    debug!("Prefetching {} listing block(s) for {}", requests.len(), context_path);

    let fetches = requests.into_iter().map(|(key, page, query)| async move {
        let results = match client.querystring_search(context_path, &query).await {
            Ok(results) => Some(results),
            Err(e) => {
                warn!("Listing '{}' on {} unavailable: {}", key, context_path, e);
                None
            }
        };
        let listing = ListingPage {
            page,
            b_size: query.b_size,
            limit: query.limit,
            results,
        };
        (key, listing)
    });

    join_all(fetches).await.into_iter().collect()
}
