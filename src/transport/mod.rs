//! HTTP transport layer for the Slack client.
//!
//! Sends form-encoded POST requests and hands back the raw status, headers
//! and body. Interpreting the response is left to the call layer so that
//! every transport classifies failures the same way.

use crate::errors::{ConfigurationError, NetworkError, SlackError, SlackResult};
use async_trait::async_trait;
use http::HeaderMap;
use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// HTTP transport trait for making API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a form-encoded request and return the raw response
    async fn send_form(&self, request: FormRequest) -> SlackResult<RawResponse>;
}

/// Form-encoded POST request
#[derive(Debug, Clone)]
pub struct FormRequest {
    /// Full request URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Form fields
    pub fields: Vec<(String, String)>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl FormRequest {
    /// Create a new form POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HeaderMap::new(),
            fields: Vec::new(),
            timeout: None,
        }
    }

    /// Add a form field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add several form fields
    pub fn fields(mut self, fields: impl IntoIterator<Item = (String, String)>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Undecoded HTTP response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    default_timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout
    pub fn new(timeout: Duration) -> SlackResult<Self> {
        Self::with_proxy(timeout, None)
    }

    /// Create a new transport routing every request through `proxy`
    pub fn with_proxy(timeout: Duration, proxy: Option<&Url>) -> SlackResult<Self> {
        let mut builder = ClientBuilder::new().timeout(timeout);

        if let Some(proxy) = proxy {
            let proxy = Proxy::all(proxy.as_str()).map_err(|e| {
                ConfigurationError::InvalidConfiguration {
                    message: format!("Invalid proxy: {}", e),
                }
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| SlackError::Network(NetworkError::Http(e.to_string())))?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Create a new transport with a pre-built client
    pub fn with_client(client: Client, default_timeout: Duration) -> Self {
        Self {
            client,
            default_timeout,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn send_form(&self, request: FormRequest) -> SlackResult<RawResponse> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .form(&request.fields)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| SlackError::Network(NetworkError::from(e)))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| SlackError::Network(NetworkError::from(e)))?;

        if (200..300).contains(&status) {
            debug!(status, response_body = %body, "Received response");
        } else {
            warn!(status, "Request failed with non-success status");
        }

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}
