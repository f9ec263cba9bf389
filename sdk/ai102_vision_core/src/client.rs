//! HTTP client for the Azure Computer Vision and Face services.
//!
//! This module provides [`VisionClient`], the transport shared by every
//! service binding. The client handles the subscription-key header, binary
//! uploads, retries on transient errors, and turns Azure error bodies into
//! [`VisionError`] values.
//!
//! # Example
//!
//! ```rust,no_run
//! use ai102_vision_core::auth::SubscriptionKey;
//! use ai102_vision_core::client::VisionClient;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = VisionClient::builder()
//!     .endpoint("https://your-resource.cognitiveservices.azure.com")
//!     .credential(SubscriptionKey::new("your-key"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::auth::{SubscriptionKey, SUBSCRIPTION_KEY_HEADER};
use crate::error::{VisionError, VisionResult};
use bytes::Bytes;
use reqwest::Client as HttpClient;
use url::Url;

use std::time::Duration;

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default read/response timeout (60 seconds).
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Content type for raw image uploads.
const OCTET_STREAM: &str = "application/octet-stream";

/// Determines if an HTTP status code represents a retriable error.
///
/// Retriable errors are transient server-side issues that may succeed on retry:
/// - 429 Too Many Requests (rate limiting)
/// - 500 Internal Server Error
/// - 502 Bad Gateway
/// - 503 Service Unavailable
/// - 504 Gateway Timeout
#[inline]
pub fn is_retriable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Configuration for automatic retry behavior on transient errors.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial backoff duration before the first retry.
    /// Subsequent retries use exponential backoff (2^attempt * initial_backoff).
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// A policy that sends every request exactly once.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Backoff before retry number `attempt + 1`, with +/-25% jitter.
    fn backoff(&self, attempt: u32) -> Duration {
        let base_backoff = self.initial_backoff * 2_u32.pow(attempt);
        let jitter = 0.75 + fastrand::f64() * 0.5;
        base_backoff.mul_f64(jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

/// The base client for the Azure vision REST APIs.
///
/// The client is cheaply cloneable and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct VisionClient {
    pub(crate) http: HttpClient,
    pub(crate) endpoint: Url,
    pub(crate) credential: SubscriptionKey,
    pub(crate) retry_policy: RetryPolicy,
}

/// Builder for constructing a [`VisionClient`].
///
/// Use [`VisionClient::builder()`] to create a new builder.
#[derive(Debug, Default)]
pub struct VisionClientBuilder {
    endpoint: Option<String>,
    credential: Option<SubscriptionKey>,
    http_client: Option<HttpClient>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
}

impl VisionClient {
    /// Create a new builder for configuring a `VisionClient`.
    pub fn builder() -> VisionClientBuilder {
        VisionClientBuilder::default()
    }

    /// Get the base endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Get the retry policy configuration.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Build a full URL for an API path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined to the endpoint URL.
    pub fn url(&self, path: &str) -> VisionResult<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| VisionError::invalid_endpoint_with_source("failed to construct URL", e))
    }

    /// Send a GET request with automatic retry on transient errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries or the server
    /// returns a non-retriable error response.
    pub async fn get(&self, path: &str) -> VisionResult<reqwest::Response> {
        let url = self.url(path)?;

        for attempt in 0..=self.retry_policy.max_retries {
            let response = self
                .http
                .get(url.clone())
                .header(SUBSCRIPTION_KEY_HEADER, self.credential.expose())
                .send()
                .await?;

            if response.status().is_success() {
                return Ok(response);
            }

            let status = response.status().as_u16();
            if !is_retriable_status(status) || attempt == self.retry_policy.max_retries {
                return self.check_response(response).await;
            }

            tracing::debug!(status, attempt, "retriable status on GET, backing off");
            tokio::time::sleep(self.retry_policy.backoff(attempt)).await;
        }

        unreachable!("retry loop should return before reaching here")
    }

    /// Send a POST request whose body is raw binary data (an image upload).
    ///
    /// The body is sent as `application/octet-stream`. `Bytes` clones are
    /// reference-counted, so retries do not copy the image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries or the server
    /// returns a non-retriable error response.
    pub async fn post_binary(&self, path: &str, body: Bytes) -> VisionResult<reqwest::Response> {
        let url = self.url(path)?;

        for attempt in 0..=self.retry_policy.max_retries {
            let response = self
                .http
                .post(url.clone())
                .header(SUBSCRIPTION_KEY_HEADER, self.credential.expose())
                .header(reqwest::header::CONTENT_TYPE, OCTET_STREAM)
                .body(body.clone())
                .send()
                .await?;

            if response.status().is_success() {
                return Ok(response);
            }

            let status = response.status().as_u16();
            if !is_retriable_status(status) || attempt == self.retry_policy.max_retries {
                return self.check_response(response).await;
            }

            tracing::debug!(status, attempt, "retriable status on POST, backing off");
            tokio::time::sleep(self.retry_policy.backoff(attempt)).await;
        }

        unreachable!("retry loop should return before reaching here")
    }

    /// Maximum length for error messages to prevent sensitive data leaks.
    const MAX_ERROR_MESSAGE_LEN: usize = 1000;

    /// Remove the client's own subscription key and any bearer tokens from a message.
    pub(crate) fn sanitize_error_message(&self, msg: &str) -> String {
        let key = self.credential.expose();
        let mut result = if key.is_empty() {
            msg.to_string()
        } else {
            msg.replace(key, "[REDACTED]")
        };

        // Bearer tokens show up when a gateway echoes request headers.
        let mut search_start = 0;
        while let Some(relative_pos) = result[search_start..].find("Bearer ") {
            let token_start = search_start + relative_pos + 7;
            if token_start >= result.len() {
                break;
            }

            if result[token_start..].starts_with("[REDACTED]") {
                search_start = token_start + 10;
                continue;
            }

            let token_end = result[token_start..]
                .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',')
                .map(|pos| token_start + pos)
                .unwrap_or(result.len());

            if token_end > token_start {
                result.replace_range(token_start..token_end, "[REDACTED]");
                search_start = token_start + 10;
            } else {
                search_start = token_start;
            }
        }

        result
    }

    /// Sanitize, then truncate a message if it exceeds the maximum length.
    pub(crate) fn truncate_message(&self, msg: &str) -> String {
        let sanitized = self.sanitize_error_message(msg);

        if sanitized.len() > Self::MAX_ERROR_MESSAGE_LEN {
            let mut cut = Self::MAX_ERROR_MESSAGE_LEN;
            while !sanitized.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}... (truncated)", &sanitized[..cut])
        } else {
            sanitized
        }
    }

    /// Check the response status and return an error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> VisionResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        // Azure services wrap failures as {"error": {"code": ..., "message": ...}}.
        if let Ok(error) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(err_obj) = error.get("error") {
                return Err(VisionError::Api {
                    code: err_obj
                        .get("code")
                        .and_then(|c| c.as_str())
                        .unwrap_or("unknown")
                        .to_string(),
                    message: self.truncate_message(
                        err_obj
                            .get("message")
                            .and_then(|m| m.as_str())
                            .unwrap_or(&body),
                    ),
                });
            }
        }

        Err(VisionError::http(status, self.truncate_message(&body)))
    }
}

impl VisionClientBuilder {
    /// Set the service endpoint URL.
    ///
    /// This should be in the format
    /// `https://<resource-name>.cognitiveservices.azure.com`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the subscription key used for authentication.
    pub fn credential(mut self, credential: SubscriptionKey) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Set a custom HTTP client.
    ///
    /// **Note:** If you provide a custom HTTP client, any timeout configuration
    /// on this builder is ignored.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout.
    ///
    /// It covers the entire request/response cycle including reading the body.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the retry policy for transient errors.
    ///
    /// Defaults to 3 retries with 500ms initial backoff.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Build the `VisionClient`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No endpoint or credential is provided
    /// - The endpoint URL is invalid
    /// - The HTTP transport cannot be initialized
    pub fn build(self) -> VisionResult<VisionClient> {
        let endpoint_str = self
            .endpoint
            .filter(|e| !e.is_empty())
            .ok_or_else(|| VisionError::MissingConfig("endpoint is required".into()))?;

        let endpoint = Url::parse(&endpoint_str)
            .map_err(|e| VisionError::invalid_endpoint_with_source("invalid endpoint URL", e))?;

        let credential = self
            .credential
            .ok_or_else(|| VisionError::MissingConfig("subscription key is required".into()))?;

        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT))
                .timeout(self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT))
                .build()?,
        };

        Ok(VisionClient {
            http,
            endpoint,
            credential,
            retry_policy: self.retry_policy.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(endpoint: &str) -> VisionClient {
        VisionClient::builder()
            .endpoint(endpoint)
            .credential(SubscriptionKey::new("test-key"))
            .build()
            .expect("should build")
    }

    #[test]
    fn builder_requires_endpoint() {
        let result = VisionClient::builder()
            .credential(SubscriptionKey::new("test"))
            .build();

        let err = result.unwrap_err();
        assert!(matches!(err, VisionError::MissingConfig(_)));
    }

    #[test]
    fn builder_rejects_empty_endpoint() {
        let result = VisionClient::builder()
            .endpoint("")
            .credential(SubscriptionKey::new("test"))
            .build();

        assert!(matches!(result.unwrap_err(), VisionError::MissingConfig(_)));
    }

    #[test]
    fn builder_requires_credential() {
        let result = VisionClient::builder()
            .endpoint("https://test.cognitiveservices.azure.com")
            .build();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("subscription key"), "error: {err}");
    }

    #[test]
    fn builder_accepts_endpoint() {
        let client = test_client("https://test.cognitiveservices.azure.com");

        assert_eq!(
            client.endpoint().as_str(),
            "https://test.cognitiveservices.azure.com/"
        );
    }

    #[test]
    fn builder_invalid_endpoint_url() {
        let result = VisionClient::builder()
            .endpoint("not a valid url")
            .credential(SubscriptionKey::new("test"))
            .build();

        assert!(matches!(
            result.unwrap_err(),
            VisionError::InvalidEndpoint { .. }
        ));
    }

    #[test]
    fn builder_uses_default_retry_policy() {
        let client = test_client("https://test.cognitiveservices.azure.com");
        assert_eq!(client.retry_policy().max_retries, 3);
        assert_eq!(
            client.retry_policy().initial_backoff,
            Duration::from_millis(500)
        );
    }

    #[test]
    fn url_joins_path() {
        let client = test_client("https://test.cognitiveservices.azure.com");

        let url = client.url("/vision/v3.2/analyze").expect("should join");
        assert_eq!(
            url.as_str(),
            "https://test.cognitiveservices.azure.com/vision/v3.2/analyze"
        );
    }

    #[test]
    fn retriable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retriable_status(status), "{status} should retry");
        }
        for status in [400, 401, 403, 404, 415] {
            assert!(!is_retriable_status(status), "{status} should not retry");
        }
    }

    #[test]
    fn sanitize_redacts_subscription_key_and_bearer_token() {
        let client = test_client("https://test.cognitiveservices.azure.com");
        let msg = "key test-key rejected; header was Bearer eyJhbGciOi, retry later";
        let sanitized = client.sanitize_error_message(msg);

        assert!(!sanitized.contains("test-key"), "{sanitized}");
        assert!(!sanitized.contains("eyJhbGciOi"), "{sanitized}");
        assert_eq!(
            sanitized,
            "key [REDACTED] rejected; header was Bearer [REDACTED], retry later"
        );
    }

    #[test]
    fn truncate_long_message() {
        let client = test_client("https://test.cognitiveservices.azure.com");
        let long = "x".repeat(1500);
        let truncated = client.truncate_message(&long);
        assert!(truncated.ends_with("... (truncated)"));
        assert_eq!(truncated.len(), 1000 + "... (truncated)".len());
    }

    #[test]
    fn default_timeouts_are_defined() {
        assert_eq!(DEFAULT_CONNECT_TIMEOUT, Duration::from_secs(10));
        assert_eq!(DEFAULT_READ_TIMEOUT, Duration::from_secs(60));
    }

    // --- Wiremock integration tests ---

    async fn setup_mock_client(server: &MockServer, policy: RetryPolicy) -> VisionClient {
        VisionClient::builder()
            .endpoint(server.uri())
            .credential(SubscriptionKey::new("test-key"))
            .retry_policy(policy)
            .build()
            .expect("should build client")
    }

    #[tokio::test]
    async fn get_request_sends_subscription_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vision/v3.2/read/analyzeResults/op-1"))
            .and(header("Ocp-Apim-Subscription-Key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "running"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server, RetryPolicy::none()).await;
        let response = client
            .get("/vision/v3.2/read/analyzeResults/op-1")
            .await
            .expect("should succeed");

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    async fn post_binary_sends_octet_stream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/vision/v3.2/analyze"))
            .and(header("Ocp-Apim-Subscription-Key", "test-key"))
            .and(header("content-type", "application/octet-stream"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server, RetryPolicy::none()).await;
        let response = client
            .post_binary("/vision/v3.2/analyze", Bytes::from_static(b"\xFF\xD8\xFF"))
            .await
            .expect("should succeed");

        assert_eq!(response.status(), 200);
        let received = server.received_requests().await.expect("recording enabled");
        assert_eq!(received[0].body, b"\xFF\xD8\xFF");
    }

    #[tokio::test]
    async fn error_response_with_azure_error_object() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/face/v1.0/detect"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {
                    "code": "401",
                    "message": "Access denied due to invalid subscription key test-key."
                }
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server, RetryPolicy::none()).await;
        let err = client
            .post_binary("/face/v1.0/detect", Bytes::from_static(b"img"))
            .await
            .unwrap_err();

        match err {
            VisionError::Api { code, message } => {
                assert_eq!(code, "401");
                assert_eq!(
                    message,
                    "Access denied due to invalid subscription key [REDACTED]."
                );
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_response_with_non_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vision/v3.2/read/analyzeResults/op-1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server, RetryPolicy::none()).await;
        let err = client
            .get("/vision/v3.2/read/analyzeResults/op-1")
            .await
            .unwrap_err();

        match err {
            VisionError::Http { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("Expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_retry_policy_sends_single_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/vision/v3.2/analyze"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server, RetryPolicy::none()).await;
        let err = client
            .post_binary("/vision/v3.2/analyze", Bytes::from_static(b"img"))
            .await
            .unwrap_err();

        assert!(matches!(err, VisionError::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn retries_transient_errors_then_succeeds() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/vision/v3.2/analyze"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/vision/v3.2/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let policy = RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(1),
        };
        let client = setup_mock_client(&server, policy).await;
        let response = client
            .post_binary("/vision/v3.2/analyze", Bytes::from_static(b"img"))
            .await
            .expect("should succeed after retries");

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn retries_exhausted_returns_last_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vision/v3.2/read/analyzeResults/op-1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(3)
            .mount(&server)
            .await;

        let policy = RetryPolicy {
            max_retries: 2,
            initial_backoff: Duration::from_millis(1),
        };
        let client = setup_mock_client(&server, policy).await;
        let err = client
            .get("/vision/v3.2/read/analyzeResults/op-1")
            .await
            .unwrap_err();

        assert!(matches!(err, VisionError::Http { status: 500, .. }));
    }
}
