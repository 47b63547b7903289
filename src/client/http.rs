//! HTTP client: dispatch, response parsing and error normalization

use std::fmt;

use bytes::Bytes;
use compact_str::{format_compact, CompactString, ToCompactString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{
    config::{RequestBody, RequestConfig},
    error::{ClientError, Result},
    url::resolve_url,
};

type ErrorHandler = Box<dyn Fn(&ClientError) + Send + Sync>;

/// Body kinds the client knows how to parse, derived from the response
/// `content-type` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Binary,
    Text,
}

impl ContentKind {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(value) if value.contains("application/json") => Self::Json,
            Some(value) if value.contains("application/octet-stream") => Self::Binary,
            _ => Self::Text,
        }
    }
}

/// Parsed response payload
#[derive(Debug, Clone)]
pub enum ResponseData {
    Json(serde_json::Value),
    Binary(Bytes),
    Text(String),
}

impl ResponseData {
    /// Borrow the payload as JSON, when it is one
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Decode a JSON payload into a typed value
    pub fn json<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        match self {
            Self::Json(value) => serde_json::from_value(value.clone()).map_err(|e| {
                ClientError::new(format_compact!("failed to decode response payload: {e}"))
            }),
            _ => Err(ClientError::new("response payload is not JSON")),
        }
    }
}

/// Response to a dispatched request, constructed fresh per call
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(CompactString, CompactString)>,
    pub data: ResponseData,
    pub config: RequestConfig,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// HTTP client owning base URL, default headers and error observers
///
/// Every failure a `request` call can produce is normalized to [`ClientError`]
/// before the registered observers run and before the caller sees it; callers
/// never receive a raw transport error.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Option<CompactString>,
    default_headers: Vec<(CompactString, CompactString)>,
    on_error: Vec<ErrorHandler>,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a client with no base URL and the default header set
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
            default_headers: vec![("Accept".into(), "application/json; charset=UTF-8".into())],
            on_error: Vec::new(),
        }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Set the base URL used to resolve relative request URLs
    pub fn set_base_url(&mut self, url: impl Into<CompactString>) {
        self.base_url = Some(url.into());
    }

    /// Merge one header into the default set applied to every request
    ///
    /// Header names compare case-insensitively; setting an existing name
    /// replaces its value.
    pub fn set_header(&mut self, name: impl Into<CompactString>, value: impl fmt::Display) {
        let name = name.into();
        let value = value.to_compact_string();
        match self
            .default_headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.default_headers.push((name, value)),
        }
    }

    /// Register an error observer, invoked in registration order with every
    /// error produced by any `request` call. Registration only; observers
    /// cannot be removed.
    pub fn on_error(&mut self, handler: impl Fn(&ClientError) + Send + Sync + 'static) {
        self.on_error.push(Box::new(handler));
    }

    /// Dispatch a request and normalize the outcome
    ///
    /// Resolves the URL against the base URL, serializes query parameters and
    /// body, and parses the response body according to its content type. A
    /// non-2xx status or a transport failure yields a [`ClientError`], after
    /// all error observers have seen it.
    #[instrument(skip(self, config), fields(method = ?config.method, url = %config.url))]
    pub async fn request(&self, config: RequestConfig) -> Result<HttpResponse> {
        match self.dispatch(&config).await {
            Ok(response) if response.is_success() => {
                debug!(status = response.status, "request completed");
                Ok(response)
            },
            Ok(response) => Err(self.report(ClientError::from_response(response))),
            Err(error) => Err(self.report(error)),
        }
    }

    // Private helper methods

    /// Notify error observers, in registration order, before the error
    /// reaches the caller
    fn report(&self, error: ClientError) -> ClientError {
        warn!(error = %error, transport = error.is_transport(), "request failed");
        for handler in &self.on_error {
            handler(&error);
        }
        error
    }

    async fn dispatch(&self, config: &RequestConfig) -> Result<HttpResponse> {
        let url = resolve_url(&config.url, self.base_url.as_deref());

        let mut request = self.client.request(config.method.into(), url.as_str());

        if !config.params.is_empty() {
            request = request.query(&config.params);
        }

        for (name, value) in self.merged_headers(config) {
            request = request.header(name.as_str(), value.as_str());
        }

        request = match &config.body {
            Some(RequestBody::Json(value)) => request.json(value),
            Some(RequestBody::Bytes(bytes)) => request.body(bytes.clone()),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(config.clone(), format_compact!("{e}")))?;

        self.read_response(response, config).await
    }

    /// Default headers merged under per-call headers; per-call wins
    fn merged_headers(&self, config: &RequestConfig) -> Vec<(CompactString, CompactString)> {
        let mut headers: Vec<_> = self
            .default_headers
            .iter()
            .filter(|(name, _)| {
                !config
                    .headers
                    .iter()
                    .any(|(overridden, _)| overridden.eq_ignore_ascii_case(name))
            })
            .cloned()
            .collect();
        headers.extend(config.headers.iter().cloned());
        headers
    }

    async fn read_response(
        &self,
        response: reqwest::Response,
        config: &RequestConfig,
    ) -> Result<HttpResponse> {
        let status = response.status().as_u16();

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    CompactString::from(name.as_str()),
                    CompactString::from(value.to_str().unwrap_or_default()),
                )
            })
            .collect();

        let kind = ContentKind::from_content_type(
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(config.clone(), format_compact!("{e}")))?;

        let data = match kind {
            ContentKind::Json => {
                ResponseData::Json(serde_json::from_slice(&body).map_err(|e| {
                    ClientError::transport(
                        config.clone(),
                        format_compact!("malformed JSON response: {e}"),
                    )
                })?)
            },
            ContentKind::Binary => ResponseData::Binary(body),
            ContentKind::Text => ResponseData::Text(String::from_utf8_lossy(&body).into_owned()),
        };

        Ok(HttpResponse {
            status,
            headers,
            data,
            config: config.clone(),
        })
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .field("error_handlers", &self.on_error.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`HttpClient`]
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    base_url: Option<CompactString>,
    headers: Vec<(CompactString, CompactString)>,
}

impl HttpClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Add a default header
    pub fn header(mut self, name: impl Into<CompactString>, value: impl fmt::Display) -> Self {
        self.headers.push((name.into(), value.to_compact_string()));
        self
    }

    /// Build the client
    pub fn build(self) -> HttpClient {
        let mut client = HttpClient::new();
        if let Some(base_url) = self.base_url {
            client.set_base_url(base_url);
        }
        for (name, value) in self.headers {
            client.set_header(name, value);
        }
        client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_dispatch() {
        assert_eq!(
            ContentKind::from_content_type(Some("application/json")),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::from_content_type(Some("application/json; charset=utf-8")),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::from_content_type(Some("application/octet-stream")),
            ContentKind::Binary
        );
        assert_eq!(
            ContentKind::from_content_type(Some("text/html")),
            ContentKind::Text
        );
        assert_eq!(ContentKind::from_content_type(None), ContentKind::Text);
    }

    #[test]
    fn test_typed_json_decoding() {
        let data = ResponseData::Json(serde_json::json!({"page": 2, "results": 10}));
        let decoded: crate::domain::ResponseInfo = data.json().unwrap();
        assert_eq!(decoded.page, 2);
        assert_eq!(decoded.results, 10);

        let data = ResponseData::Text("not json".into());
        let decoded: Result<crate::domain::ResponseInfo> = data.json();
        assert!(decoded.is_err());
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut client = HttpClient::new();
        client.set_header("accept", "text/plain");

        assert_eq!(client.default_headers.len(), 1);
        assert_eq!(client.default_headers[0].0, "Accept");
        assert_eq!(client.default_headers[0].1, "text/plain");

        client.set_header("X-Api-Key", "abc");
        assert_eq!(client.default_headers.len(), 2);
    }

    #[test]
    fn test_per_call_headers_override_defaults() {
        let client = HttpClient::builder()
            .header("X-Api-Key", "abc")
            .build();

        let config = RequestConfig::get("users").with_header("ACCEPT", "text/csv");
        let merged = client.merged_headers(&config);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].0, "X-Api-Key");
        assert_eq!(merged[1].0, "ACCEPT");
        assert_eq!(merged[1].1, "text/csv");
    }

    #[test]
    fn test_builder() {
        let client = HttpClient::builder()
            .base_url("https://api.example.com/v1")
            .header("X-Api-Key", "abc")
            .build();

        assert_eq!(client.base_url.as_deref(), Some("https://api.example.com/v1"));
        assert!(client
            .default_headers
            .iter()
            .any(|(name, value)| name == "X-Api-Key" && value == "abc"));
    }
}
