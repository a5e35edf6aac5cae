//! Error types for the proxy server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Proxy Error Enum ==
/// Unified error type for the proxy server.
///
/// The cache and debounce primitives never produce errors; everything here
/// comes from request validation, the upstream API, or startup.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Route or resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Upstream could not be reached or sent an unreadable body
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    // == Status Code ==
    /// HTTP status this error is reported with.
    ///
    /// Upstream client errors (4xx, including 429 rate limiting) pass through
    /// unchanged; any other upstream failure becomes 502.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::Upstream { status, .. } => match StatusCode::from_u16(*status) {
                Ok(code) if code.is_client_error() => code,
                _ => StatusCode::BAD_GATEWAY,
            },
            ProxyError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Config(_) | ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ProxyError::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => ProxyError::UpstreamUnavailable(err.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, "Request failed");
        }

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy server.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use proptest::prelude::*;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (ProxyError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
            (ProxyError::NotFound("route".to_string()), StatusCode::NOT_FOUND),
            (
                ProxyError::Upstream { status: 429, message: "slow down".to_string() },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                ProxyError::Upstream { status: 400, message: "bad token".to_string() },
                StatusCode::BAD_REQUEST,
            ),
            (
                ProxyError::Upstream { status: 500, message: "boom".to_string() },
                StatusCode::BAD_GATEWAY,
            ),
            (
                ProxyError::Upstream { status: 302, message: "moved".to_string() },
                StatusCode::BAD_GATEWAY,
            ),
            (ProxyError::UpstreamUnavailable("timeout".to_string()), StatusCode::BAD_GATEWAY),
            (ProxyError::Config("url".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (ProxyError::Internal("error".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should map to correct HTTP status"
            );
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        // Every error variant renders as JSON with a string "error" field
        // carrying the error's message.
        #[test]
        fn prop_error_response_format(error_msg in "[a-zA-Z0-9 _-]{1,100}", status in 400u16..600) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let error_variants = vec![
                ProxyError::InvalidRequest(error_msg.clone()),
                ProxyError::NotFound(error_msg.clone()),
                ProxyError::Upstream { status, message: error_msg.clone() },
                ProxyError::UpstreamUnavailable(error_msg.clone()),
                ProxyError::Config(error_msg.clone()),
                ProxyError::Internal(error_msg.clone()),
            ];

            for error in error_variants {
                let expected_msg = error.to_string();
                let response = error.into_response();

                let content_type = response.headers()
                    .get("content-type")
                    .and_then(|v| v.to_str().ok());
                prop_assert!(
                    content_type.map(|ct| ct.contains("application/json")).unwrap_or(false),
                    "Response should have JSON content-type"
                );

                let bytes = rt.block_on(async {
                    to_bytes(response.into_body(), usize::MAX).await.unwrap()
                });
                let json: serde_json::Value = serde_json::from_slice(&bytes)
                    .expect("Response body should be valid JSON");

                prop_assert_eq!(json["error"].as_str(), Some(expected_msg.as_str()));
            }
        }
    }
}
