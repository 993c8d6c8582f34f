//! Request descriptors and the HTTP collaborator that sends them.

use crate::config::TargetConfig;
use crate::error::{HarnessError, Result};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// One request, built per call and dropped once sent.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a query pair. Repeating a key sends it repeatedly.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attaches an `Authorization: Bearer` header.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Attaches an optional bearer token.
    pub fn maybe_bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }

    /// Attaches a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A received response: status, headers and a leniently parsed body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// JSON body. Empty bodies are `Null`; non-JSON text is kept as a string.
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, headers: HeaderMap, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Builds a response from raw body text.
    pub fn from_text(status: u16, headers: HeaderMap, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self::new(status, headers, body)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| HarnessError::Decode(format!("{} (status {})", e, self.status)))
    }
}

/// Thin wrapper over a `reqwest::Client` bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    protected_prefix: String,
}

impl ApiClient {
    /// Builds a client from the target configuration.
    pub fn new(target: &TargetConfig) -> Result<Self> {
        let client = Client::builder().timeout(target.timeout()).build()?;
        Ok(Self {
            client,
            base_url: target.base_url.trim_end_matches('/').to_string(),
            protected_prefix: target.protected_prefix.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Prefix of routes where writes require a token.
    pub fn protected_prefix(&self) -> &str {
        &self.protected_prefix
    }

    /// Sends a request. Non-2xx statuses are returned, not raised.
    pub async fn send(&self, req: &RequestDescriptor) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, req.path);
        let mut builder = self.client.request(req.method.clone(), &url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(token) = &req.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let text = resp.text().await?;

        debug!(
            method = %req.method,
            path = %req.path,
            status,
            "request completed"
        );

        Ok(ApiResponse::from_text(status, headers, &text))
    }
}
