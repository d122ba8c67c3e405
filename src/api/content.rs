use super::PloneClient;
use crate::blocks::ContentNode;
use crate::error::GatewayError;
use crate::retry::{with_retry_if, RetryConfig};
use serde::Deserialize;
use tracing::warn;

/// One entry of the navigation tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavItem {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub items: Vec<NavItem>,
}

#[derive(Debug, Deserialize)]
struct NavigationResponse {
    #[serde(default)]
    items: Vec<NavItem>,
}

impl PloneClient {
    /// Fetch the content object at `path`, retrying transient failures.
    pub async fn fetch_content(&self, path: &str) -> Result<ContentNode, GatewayError> {
        let url = self.endpoint(path);
        with_retry_if(
            &RetryConfig::content_fetch(),
            &format!("Content {}", path),
            || self.get_json::<ContentNode>(&url),
            GatewayError::is_retryable,
        )
        .await
    }

    /// Fetch the navigation tree below `path`. Failures yield an empty menu.
    pub async fn fetch_navigation(&self, path: &str, depth: u32) -> Vec<NavItem> {
        let url = format!("{}/@navigation?depth={}", self.endpoint(path), depth);
        match self.get_json::<NavigationResponse>(&url).await {
            Ok(navigation) => navigation.items,
            Err(e) => {
                warn!("Navigation unavailable for {}: {}", path, e);
                Vec::new()
            }
        }
    }
}
