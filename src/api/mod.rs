//! Client for the Plone REST API.
//!
//! Every outbound call of the front end goes through [`PloneClient`]. Calls
//! that feed optional features (site settings, translations, navigation)
//! are fail-soft and return documented defaults; content fetches return a
//! [`GatewayError`] so the page handler can choose between 404 and 502.

mod binary;
mod content;
mod search;
mod site;
mod translations;

pub use binary::BinaryResponse;
pub use content::NavItem;
pub use search::{ListingItem, SearchQuery, SearchResults};
pub use translations::extract_relative_path_from_url;

use crate::error::GatewayError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("plone-front/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct PloneClient {
    http: reqwest::Client,
    api_base: String,
}

impl PloneClient {
    /// Create a client for the API rooted at `api_base`
    /// (e.g. `http://backend:8080/Plone/++api++`).
    pub fn new(api_base: impl Into<String>) -> Result<Self, GatewayError> {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|source| GatewayError::Transport {
                url: api_base.clone(),
                source,
            })?;

        Ok(Self { http, api_base })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// `{api_base}{path}`, where `path` is site-relative
    fn endpoint(&self, path: &str) -> String {
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            self.api_base.clone()
        } else if path.starts_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.to_string(),
                source,
            })?;

        decode_json(url, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.to_string(),
                source,
            })?;

        decode_json(url, response).await
    }
}

async fn decode_json<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| GatewayError::Transport {
            url: url.to_string(),
            source,
        })?;

    serde_json::from_slice(&body).map_err(|source| GatewayError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = PloneClient::new("http://backend/Plone/++api++/").unwrap();
        assert_eq!(client.api_base(), "http://backend/Plone/++api++");
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = PloneClient::new("http://backend/api").unwrap();
        assert_eq!(client.endpoint("/@site"), "http://backend/api/@site");
        assert_eq!(client.endpoint("en/about/"), "http://backend/api/en/about");
        assert_eq!(client.endpoint("/"), "http://backend/api");
        assert_eq!(client.endpoint(""), "http://backend/api");
    }
}
