//! Mock implementations for testing.
//!
//! [`MockHttpTransport`] replays queued responses and records every request
//! it receives so tests can assert on the exact form fields sent.

use crate::errors::{NetworkError, SlackError, SlackResult};
use crate::transport::{FormRequest, HttpTransport, RawResponse};
use async_trait::async_trait;
use http::HeaderMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock response configuration
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Response body
    pub body: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Delay before response
    pub delay_ms: Option<u64>,
    /// Network failure to return instead of a response
    pub error: Option<NetworkError>,
}

impl MockResponse {
    /// Create a successful JSON response
    pub fn json<T: Serialize>(data: &T) -> Self {
        Self::ok(serde_json::to_string(data).unwrap_or_default())
    }

    /// Create a successful response with raw body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    /// Create a response with an arbitrary status
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status,
            headers: HeaderMap::new(),
            delay_ms: None,
            error: None,
        }
    }

    /// Create a Slack API error response
    pub fn slack_error(error_code: &str) -> Self {
        Self::ok(format!(r#"{{"ok":false,"error":"{}"}}"#, error_code))
    }

    /// Create a network failure
    pub fn network_error(error: NetworkError) -> Self {
        Self {
            error: Some(error),
            ..Self::with_status(0, "")
        }
    }

    /// Add a response header
    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers
            .insert(name, http::HeaderValue::from_static(value));
        self
    }

    /// Add delay to response
    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = Some(ms);
        self
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Form fields in the order they were sent
    pub fields: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a form field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a form field was sent
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// API method derived from the URL
    pub fn method(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or_default()
    }
}

/// Mock HTTP transport for testing
pub struct MockHttpTransport {
    /// Queue of responses to return
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Recorded requests
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Default response if queue is empty
    default_response: Option<MockResponse>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            default_response: None,
        }
    }

    /// Add a response to the queue
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Add a JSON response
    pub fn add_json_response<T: Serialize>(self, data: &T) -> Self {
        self.add_response(MockResponse::json(data))
    }

    /// Set default response when queue is empty
    pub fn with_default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Get remaining response count
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().len()
    }

    fn next_response(&self) -> Option<MockResponse> {
        let mut queue = self.responses.lock();
        queue.pop_front().or_else(|| self.default_response.clone())
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send_form(&self, request: FormRequest) -> SlackResult<RawResponse> {
        self.requests.lock().push(RecordedRequest {
            url: request.url,
            fields: request.fields,
        });

        let response = self.next_response().ok_or_else(|| {
            SlackError::Network(NetworkError::Http("No mock response configured".to_string()))
        })?;

        if let Some(delay) = response.delay_ms {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }

        if let Some(error) = response.error {
            return Err(SlackError::Network(error));
        }

        Ok(RawResponse {
            status: response.status,
            headers: response.headers,
            body: response.body,
        })
    }
}

impl std::fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpTransport")
            .field("pending_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport =
            MockHttpTransport::new().with_default_response(MockResponse::ok(r#"{"ok":true}"#));

        let request = FormRequest::post("https://slack.com/api/im.open").field("user", "U1");
        let response = transport.send_form(request).await.unwrap();

        assert_eq!(response.status, 200);
        let recorded = transport.last_request().unwrap();
        assert_eq!(recorded.method(), "im.open");
        assert_eq!(recorded.field("user"), Some("U1"));
        assert!(!recorded.has_field("token"));
    }

    #[tokio::test]
    async fn test_mock_transport_queue_exhausted() {
        let transport = MockHttpTransport::new().add_response(MockResponse::slack_error("nope"));

        assert!(transport.send_form(FormRequest::post("u")).await.is_ok());
        assert_eq!(transport.remaining_responses(), 0);
        assert!(transport.send_form(FormRequest::post("u")).await.is_err());
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_transport_network_error() {
        let transport =
            MockHttpTransport::new().add_response(MockResponse::network_error(NetworkError::Timeout));

        let result = transport.send_form(FormRequest::post("u")).await;
        assert!(matches!(result, Err(SlackError::Network(NetworkError::Timeout))));
    }
}
