//! HTTP transport seam
//!
//! Adapters never touch reqwest directly; they hand an `HttpRequest` to an
//! `HttpTransport`. Production code uses `ReqwestTransport`, tests swap in
//! `MockTransport` to script replies and count calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use thiserror::Error;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A single outbound request
#[derive(Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Per-request timeout; `None` defers to the transport
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Create a POST request with a JSON body
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
            timeout: None,
        }
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several headers
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Value of the first header with this name (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// URLs and header values can carry credentials, so only their shape is shown.
impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("headers", &header_names)
            .field("has_body", &self.body.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A raw response: status plus body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Failures of the transport itself, before any HTTP status exists
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Performs one HTTP exchange
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    default_timeout: Option<Duration>,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    /// Create a transport with reqwest's default timeouts
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            default_timeout: None,
        }
    }

    /// Apply a timeout to every request that does not set its own
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|_| TransportError::InvalidRequest(format!("invalid header name '{}'", name)))?;
            // The value is never echoed: it is usually a credential
            let header_value = HeaderValue::from_str(value.trim()).map_err(|_| {
                TransportError::InvalidRequest(format!("invalid value for header '{}'", name))
            })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidRequest(format!("invalid endpoint URL: {}", e)))?;

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        builder = builder.headers(Self::header_map(&request.headers)?);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        if let Some(timeout) = request.timeout.or(self.default_timeout) {
            builder = builder.timeout(timeout);
        }

        // reqwest errors embed the URL, which may carry a key
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Request(e.without_url().to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.without_url().to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::post("https://api.example.com/v1/chat", json!({"a": 1}))
            .header("Authorization", "Bearer sk-secret")
            .headers(vec![("X-Extra".into(), "1".into())])
            .timeout(Duration::from_secs(5));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.header_value("authorization"), Some("Bearer sk-secret"));
        assert_eq!(request.header_value("x-extra"), Some("1"));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_request_debug_hides_secrets() {
        let request = HttpRequest::get("https://api.example.com/models?key=AIzaSecret")
            .header("x-api-key", "sk-secret");
        let debug = format!("{:?}", request);
        assert!(!debug.contains("AIzaSecret"));
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("x-api-key"));
    }

    #[test]
    fn test_response_helpers() {
        let ok = HttpResponse { status: 200, body: r#"{"text":"hi"}"#.into() };
        assert!(ok.is_success());
        assert_eq!(ok.json().unwrap()["text"], "hi");

        let bad = HttpResponse { status: 401, body: "nope".into() };
        assert!(!bad.is_success());
        assert!(bad.json().is_err());
    }

    #[test]
    fn test_header_map_rejects_invalid_names() {
        let err = ReqwestTransport::header_map(&[("bad header".into(), "v".into())]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));

        let err = ReqwestTransport::header_map(&[("X-Key".into(), "line\nbreak".into())]).unwrap_err();
        assert!(!err.to_string().contains("line"));

        assert!(ReqwestTransport::header_map(&[("X-Key".into(), " value ".into())]).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let transport = ReqwestTransport::new();
        let err = transport
            .send(HttpRequest::get("not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }
}
