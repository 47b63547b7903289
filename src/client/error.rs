//! Normalized error type for client operations

use compact_str::{format_compact, CompactString};
use thiserror::Error;

use super::{config::RequestConfig, http::HttpResponse};

/// Normalized error for all client failures
///
/// Transport failures (the request never produced a response) and application
/// failures (the server answered with a non-2xx status) share this one shape;
/// `response` is populated only for the latter, which is the sole structural
/// difference callers ever need to inspect.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClientError {
    pub message: CompactString,
    pub config: Option<RequestConfig>,
    pub response: Option<HttpResponse>,
}

impl ClientError {
    /// Create an error carrying only a message
    pub fn new(message: impl Into<CompactString>) -> Self {
        Self {
            message: message.into(),
            config: None,
            response: None,
        }
    }

    /// Create a transport error: the request never produced a response
    pub fn transport(config: RequestConfig, message: impl Into<CompactString>) -> Self {
        Self {
            message: message.into(),
            config: Some(config),
            response: None,
        }
    }

    /// Create an application error from a non-2xx response
    ///
    /// The message is taken from the response's own `message` field when the
    /// body is JSON and carries one, falling back to a generic status line.
    pub fn from_response(response: HttpResponse) -> Self {
        let message = response
            .data
            .as_json()
            .and_then(|data| data.get("message"))
            .and_then(|message| message.as_str())
            .map(CompactString::from)
            .unwrap_or_else(|| format_compact!("server response status: {}", response.status));

        Self {
            message,
            config: Some(response.config.clone()),
            response: Some(response),
        }
    }

    /// Whether this error is a transport failure (no response obtained)
    pub fn is_transport(&self) -> bool {
        self.response.is_none()
    }

    /// Status code of the failed response, when one was received
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|response| response.status)
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::http::ResponseData;

    fn error_response(status: u16, data: ResponseData) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            data,
            config: RequestConfig::get("users"),
        }
    }

    #[test]
    fn test_transport_error_has_no_response() {
        let err = ClientError::transport(RequestConfig::get("users"), "connection refused");

        assert!(err.is_transport());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.config.as_ref().map(|c| c.url.as_str()), Some("users"));
    }

    #[test]
    fn test_message_extracted_from_json_body() {
        let response = error_response(404, ResponseData::Json(json!({"message": "no such user"})));
        let err = ClientError::from_response(response);

        assert!(!err.is_transport());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "no such user");
    }

    #[test]
    fn test_generic_message_fallback() {
        let response = error_response(500, ResponseData::Text("oops".into()));
        let err = ClientError::from_response(response);

        assert_eq!(err.to_string(), "server response status: 500");

        let response = error_response(503, ResponseData::Json(json!({"error": "down"})));
        let err = ClientError::from_response(response);

        assert_eq!(err.to_string(), "server response status: 503");
    }

    #[test]
    fn test_error_carries_originating_config() {
        let response = error_response(418, ResponseData::Text(String::new()));
        let err = ClientError::from_response(response);

        assert_eq!(err.config.as_ref().map(|c| c.url.as_str()), Some("users"));
        assert_eq!(
            err.response.as_ref().map(|r| r.config.url.as_str()),
            Some("users")
        );
    }
}
