//! The transport boundary.
//!
//! The client never talks to the network directly: it hands a rendered
//! URL to a [`Transport`] collaborator and gets back a status, a declared
//! content type, and the raw body bytes. The trait is deliberately a
//! single method so test doubles stay hand-written and trivial.
//!
//! [`HttpTransport`] is the reqwest-backed implementation used by default.

use async_trait::async_trait;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// HTTP-equivalent request methods the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Retrieve, the only method search needs.
    Get,
}

/// One request handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// The request method.
    pub method: Method,
    /// The fully rendered request URL.
    pub url: String,
}

impl TransportRequest {
    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
        }
    }
}

/// The raw result of one exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// The HTTP-equivalent status code.
    pub status: u16,
    /// The declared Content-Type header value, if any.
    pub content_type: Option<String>,
    /// The response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The transport collaborator: completes one exchange, or fails.
///
/// Implementations must be shareable between concurrent searches; the
/// client keeps exactly one in-flight call per search and never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request and returns the raw response.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport from client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url: reqwest::Url =
            request
                .url
                .parse()
                .map_err(|_| TransportError::InvalidUrl {
                    url: request.url.clone(),
                })?;

        debug!(method = ?request.method, url = %url, "executing request");

        let response = match request.method {
            Method::Get => self.client.get(url).send().await?,
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "exchange complete");

        Ok(TransportResponse {
            status,
            content_type,
            body,
        })
    }
}
