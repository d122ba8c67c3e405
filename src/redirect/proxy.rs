//! Image and file downloads are served by the backend; the front end only
//! relays them.

use crate::api::PloneClient;
use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

const BINARY_MARKERS: [&str; 2] = ["@@images", "@@download"];

/// Whether `path` addresses an image scale or a file download.
pub fn is_binary_path(path: &str) -> bool {
    path.split('/').any(|segment| BINARY_MARKERS.contains(&segment))
}

/// Relay `path_and_query` from the backend, keeping status, content type
/// and caching headers. Transport failures become `502 Bad Gateway`.
pub async fn forward(client: &PloneClient, path_and_query: &str) -> Response {
    let binary = match client.fetch_binary(path_and_query).await {
        Ok(binary) => binary,
        Err(e) => {
            warn!("Binary proxy failed: {}", e);
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };
    debug!("Proxied {} ({})", path_and_query, binary.status);

    let mut builder = Response::builder().status(binary.status);
    if let Some(content_type) = binary.content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    if let Some(cache_control) = binary.cache_control {
        builder = builder.header(CACHE_CONTROL, cache_control);
    }

    match builder.body(Body::from(binary.body)) {
        Ok(response) => response,
        Err(e) => {
            warn!("Invalid upstream headers for {}: {}", path_and_query, e);
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_is_binary_path() {
        assert!(is_binary_path("/en/logo.png/@@images/image/preview"));
        assert!(is_binary_path("/en/report.pdf/@@download/file"));
        assert!(is_binary_path("/en/logo.png/@@images/image-800x600.png"));
        assert!(!is_binary_path("/en/@@images-gallery"));
        assert!(!is_binary_path("/en/about"));
        assert!(!is_binary_path("/"));
    }

    #[tokio::test]
    async fn test_forward_relays_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/en/logo.png/@@images/image/preview"))
            .and(query_param("v", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .insert_header("cache-control", "public, max-age=86400")
                    .set_body_bytes(b"png".to_vec()),
            )
            .mount(&mock_server)
            .await;

        let client = PloneClient::new(mock_server.uri()).unwrap();
        let response = forward(&client, "/en/logo.png/@@images/image/preview?v=2").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "image/png");
        assert_eq!(response.headers()[CACHE_CONTROL], "public, max-age=86400");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"png");
    }

    #[tokio::test]
    async fn test_forward_keeps_upstream_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let client = PloneClient::new(mock_server.uri()).unwrap();
        let response = forward(&client, "/private/file.pdf/@@download/file").await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_forward_unreachable_backend_is_bad_gateway() {
        let client = PloneClient::new("http://localhost:1").unwrap();
        let response = forward(&client, "/x/@@images/image").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
