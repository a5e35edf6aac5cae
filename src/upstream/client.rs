//! Aggregator API client
//!
//! Thin reqwest wrapper that forwards requests to the third-party aggregator
//! and turns its responses into JSON values or [`ProxyError`]s.

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ProxyError, Result};

/// Longest upstream error body echoed back to callers
const MAX_ERROR_BODY: usize = 512;

// == Aggregator Client ==
/// HTTP client for the upstream aggregator API.
///
/// Paths passed to [`get_json`](Self::get_json) and
/// [`post_json`](Self::post_json) are appended to the configured base URL.
#[derive(Debug)]
pub struct AggregatorClient {
    http: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl AggregatorClient {
    // == Constructor ==
    /// Creates a client for `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - Absolute http(s) URL of the aggregator API
    /// * `api_key` - Optional key sent as a bearer token
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, api_key: Option<SecretString>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ProxyError::Config(format!("Invalid upstream base URL '{}': {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ProxyError::Config(format!(
                "Upstream base URL must be http or https, got '{}'",
                base_url.scheme()
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // == GET ==
    /// Sends `GET {base}{path}?{query}` and returns the JSON body.
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let request = self.http.get(self.endpoint(path)).query(query);
        self.send(request, path).await
    }

    // == POST ==
    /// Sends `POST {base}{path}` with a JSON body and returns the JSON body.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let request = self.http.post(self.endpoint(path)).json(body);
        self.send(request, path).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send(&self, mut request: RequestBuilder, path: &str) -> Result<Value> {
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        debug!(
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        let bytes = response.bytes().await?;

        if !status.is_success() {
            warn!(path, status = status.as_u16(), "Upstream request failed");
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            ProxyError::UpstreamUnavailable(format!("Malformed upstream response from {}: {}", path, e))
        })
    }
}

/// Extracts a human-readable message from an upstream error body.
///
/// Aggregator errors are usually JSON with a `description`, `message` or
/// `error` field; anything else is passed through as (truncated) text.
fn error_message(body: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<Value>(body) {
        for field in ["description", "message", "error"] {
            if let Some(text) = json.get(field).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "no response body".to_string();
    }
    text.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> AggregatorClient {
        AggregatorClient::new(
            &server.uri(),
            api_key.map(|k| SecretString::from(k.to_string())),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = AggregatorClient::new("not a url", None, Duration::from_secs(1));
        assert!(matches!(result, Err(ProxyError::Config(_))));

        let result = AggregatorClient::new("ftp://example.com", None, Duration::from_secs(1));
        assert!(matches!(result, Err(ProxyError::Config(_))));
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let client =
            AggregatorClient::new("https://api.example.com/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint("/token/v1.2/1"), "https://api.example.com/token/v1.2/1");
        assert_eq!(client.endpoint("token/v1.2/1"), "https://api.example.com/token/v1.2/1");
    }

    #[tokio::test]
    async fn test_get_json_forwards_query_and_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/swap/v6.0/1/quote"))
            .and(query_param("src", "0xa"))
            .and(header("authorization", "Bearer secret-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"dstAmount": "42"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("secret-key"));
        let body = client
            .get_json("/swap/v6.0/1/quote", &[("src", "0xa")])
            .await
            .unwrap();

        assert_eq!(body, json!({"dstAmount": "42"}));
    }

    #[tokio::test]
    async fn test_post_json_sends_body() {
        let server = MockServer::start().await;
        let order = json!({"maker": "0x1", "makingAmount": "10"});
        Mock::given(method("POST"))
            .and(path("/orderbook/v4.0/1"))
            .and(body_json(&order))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let body = client.post_json("/orderbook/v4.0/1", &order).await.unwrap();

        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_non_success_maps_to_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"description": "insufficient liquidity"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.get_json("/swap/v6.0/1/quote", &[]).await.unwrap_err();

        match err {
            ProxyError::Upstream { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "insufficient liquidity");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.get_json("/token/v1.2/1", &[]).await.unwrap_err();

        assert!(matches!(err, ProxyError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_unavailable() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let client =
            AggregatorClient::new("http://127.0.0.1:9", None, Duration::from_millis(500)).unwrap();
        let err = client.get_json("/token/v1.2/1", &[]).await.unwrap_err();

        assert!(matches!(err, ProxyError::UpstreamUnavailable(_)));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(br#"{"error":"rate limited"}"#), "rate limited");
        assert_eq!(error_message(b"plain failure"), "plain failure");
        assert_eq!(error_message(b""), "no response body");
        assert_eq!(error_message(&[b'x'; 2000]).len(), MAX_ERROR_BODY);
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let client = AggregatorClient::new(
            "https://api.example.com",
            Some(SecretString::from("super-secret".to_string())),
            Duration::from_secs(1),
        )
        .unwrap();

        assert!(!format!("{:?}", client).contains("super-secret"));
    }
}
