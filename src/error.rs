//! Error types shared by the content API gateway and the block registry.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the content API.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    /// Transport errors, 429 and 5xx are worth another attempt; other 4xx are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport { .. } => true,
            GatewayError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            GatewayError::Decode { .. } => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// A deferred block view could not be produced.
#[derive(Debug, Error)]
#[error("failed to load view for block type '{tag}': {reason}")]
pub struct LoadError {
    pub tag: String,
    pub reason: String,
}

impl LoadError {
    pub fn new(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode) -> GatewayError {
        GatewayError::Status {
            url: "http://backend/@site".to_string(),
            status,
        }
    }

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(status_error(StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(status_error(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(status_error(StatusCode::TOO_MANY_REQUESTS).is_retryable());
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        assert!(!status_error(StatusCode::NOT_FOUND).is_retryable());
        assert!(!status_error(StatusCode::UNAUTHORIZED).is_retryable());
        assert!(!status_error(StatusCode::BAD_REQUEST).is_retryable());
    }

    #[test]
    fn test_decode_errors_are_not_retryable() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = GatewayError::Decode {
            url: "http://backend/page".to_string(),
            source,
        };
        assert!(!error.is_retryable());
        assert!(error.to_string().contains("http://backend/page"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(status_error(StatusCode::NOT_FOUND).is_not_found());
        assert!(!status_error(StatusCode::GONE).is_not_found());
    }

    #[test]
    fn test_status_error_message() {
        let message = status_error(StatusCode::SERVICE_UNAVAILABLE).to_string();
        assert!(message.contains("503"), "got: {}", message);
    }

    #[test]
    fn test_load_error_message() {
        let error = LoadError::new("video", "pattern failed to compile");
        assert_eq!(
            error.to_string(),
            "failed to load view for block type 'video': pattern failed to compile"
        );
    }
}
