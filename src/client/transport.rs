//! HTTP transport used by the client.
//!
//! The client never talks to `reqwest` directly; it hands an [`HttpRequest`]
//! to a [`Transport`]. [`HttpTransport`] is the production implementation and
//! [`MockTransport`](super::MockTransport) replays canned responses in tests.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use super::AdsError;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One request to the search service
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Query parameters appended to `url`
    pub query: Vec<(String, String)>,
    /// JSON body (POST only)
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add an `Authorization: Bearer` header
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    /// Add a query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set a JSON body
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of the first query parameter called `name`
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one request/response exchange
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send `request` and return the response, or [`AdsError::Transport`]
    /// when no response could be obtained
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, AdsError>;
}

/// `reqwest`-backed transport with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Arc<Client>,
}

impl HttpTransport {
    /// Create a new transport with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, AdsError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AdsError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, AdsError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AdsError::Transport(format!("Request to {} failed: {}", request.url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AdsError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::get("https://example.com/search")
            .bearer("secret")
            .query("q", "dark matter")
            .query("rows", "10");

        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.headers,
            vec![("Authorization".to_string(), "Bearer secret".to_string())]
        );
        assert_eq!(request.query_value("q"), Some("dark matter"));
        assert_eq!(request.query_value("missing"), None);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_response_status() {
        assert!(HttpResponse::ok("{}").is_success());
        assert!(!HttpResponse::new(401, "unauthorized").is_success());
    }
}
