use super::PloneClient;
use crate::error::GatewayError;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::debug;

/// Upstream answer for an image or file download, passed through as-is.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub body: axum::body::Bytes,
}

impl PloneClient {
    /// Fetch binary content at a site-relative `path_and_query`.
    ///
    /// Only transport failures are errors; non-2xx answers are returned
    /// with their status so the caller can relay them.
    pub async fn fetch_binary(&self, path_and_query: &str) -> Result<BinaryResponse, GatewayError> {
        let url = format!("{}{}", self.api_base, path_and_query);
        debug!("GET {} (binary)", url);

        let transport = |source| GatewayError::Transport {
            url: url.clone(),
            source,
        };

        let response = self.http.get(&url).send().await.map_err(transport)?;

        let status = response.status();
        let header = |name| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let cache_control = header(CACHE_CONTROL);

        let body = response.bytes().await.map_err(transport)?;

        Ok(BinaryResponse {
            status,
            content_type,
            cache_control,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn test_fetch_binary_passes_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/en/logo.png/@@images/image/preview"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .insert_header("cache-control", "max-age=3600")
                    .set_body_bytes(vec![0x89, b'P', b'N', b'G']),
            )
            .mount(&mock_server)
            .await;

        let client = PloneClient::new(mock_server.uri()).unwrap();
        let response = client
            .fetch_binary("/en/logo.png/@@images/image/preview")
            .await
            .expect("binary");

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type.as_deref(), Some("image/png"));
        assert_eq!(response.cache_control.as_deref(), Some("max-age=3600"));
        assert_eq!(&response.body[..], &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_fetch_binary_relays_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/en/file.pdf/@@download/file"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = PloneClient::new(mock_server.uri()).unwrap();
        let response = client
            .fetch_binary("/en/file.pdf/@@download/file")
            .await
            .expect("binary");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fetch_binary_connection_error() {
        let client = PloneClient::new("http://localhost:1").unwrap();
        assert!(client.fetch_binary("/x/@@images/image").await.is_err());
    }
}
