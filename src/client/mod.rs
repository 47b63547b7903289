//! HTTP client modules
//!
//! Request building, URL resolution, response parsing by content type and
//! error normalization, split into focused components.

pub mod config;
pub mod error;
pub mod http;
pub mod url;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use config::{RequestBody, RequestConfig, RequestMethod};
pub use error::{ClientError, Result};
pub use http::{ContentKind, HttpClient, HttpClientBuilder, HttpResponse, ResponseData};
