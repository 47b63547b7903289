//! Per-request configuration

use bytes::Bytes;
use compact_str::{CompactString, ToCompactString};

/// HTTP methods supported by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Options,
    Post,
    Put,
    Delete,
    Patch,
}

impl From<RequestMethod> for reqwest::Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Options => reqwest::Method::OPTIONS,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
            RequestMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Request payload
///
/// JSON bodies are serialized before dispatch; binary payloads are passed
/// through unmodified.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Bytes(Bytes),
}

/// Configuration for a single request
///
/// Headers and query parameter values are coerced to strings at insertion.
/// The config is cloned into the response and into any resulting error, so
/// observers can see what was sent.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: RequestMethod,
    pub url: CompactString,
    pub headers: Vec<(CompactString, CompactString)>,
    pub params: Vec<(CompactString, CompactString)>,
    pub body: Option<RequestBody>,
}

impl RequestConfig {
    /// Create a request config for the given method and URL
    pub fn new(method: RequestMethod, url: impl Into<CompactString>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            params: Vec::new(),
            body: None,
        }
    }

    /// Shorthand for a GET request config
    pub fn get(url: impl Into<CompactString>) -> Self {
        Self::new(RequestMethod::Get, url)
    }

    /// Shorthand for a POST request config
    pub fn post(url: impl Into<CompactString>) -> Self {
        Self::new(RequestMethod::Post, url)
    }

    /// Add a per-call header, overriding any client default of the same name
    pub fn with_header(
        mut self,
        name: impl Into<CompactString>,
        value: impl std::fmt::Display,
    ) -> Self {
        self.headers.push((name.into(), value.to_compact_string()));
        self
    }

    /// Add a query parameter; the value is coerced to a string
    pub fn with_param(
        mut self,
        name: impl Into<CompactString>,
        value: impl std::fmt::Display,
    ) -> Self {
        self.params.push((name.into(), value.to_compact_string()));
        self
    }

    /// Set a JSON body
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set a binary body, passed through unmodified
    pub fn with_bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(RequestBody::Bytes(body.into()));
        self
    }
}
