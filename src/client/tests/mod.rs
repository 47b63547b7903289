//! Test utilities and common fixtures for client modules

use serde_json::json;


/// JSON page of users in the listing API's response shape
pub fn users_json_response() -> serde_json::Value {
    json!({
        "results": [
            {
                "gender": "female",
                "name": {"title": "Ms", "first": "Ada", "last": "Lovelace"},
                "email": "ada@example.com",
                "login": {
                    "uuid": "9a1b6a40-54a1-4c13-8862-2fc31cd56f3b",
                    "username": "countess",
                    "password": "engine",
                    "salt": "Fdr2V9rN",
                    "md5": "6e2f9a3b4c5d6e7f8091a2b3c4d5e6f7",
                    "sha1": "1f2e3d4c5b6a798887969594a3b2c1d0e9f8a7b6",
                    "sha256": "0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0"
                },
                "dob": {"date": "1815-12-10T00:00:00.000Z", "age": 36},
                "registered": {"date": "2015-06-01T12:00:00.000Z", "age": 10},
                "phone": "011-962-7516",
                "cell": "081-454-0666",
                "id": {"name": "PPS", "value": "3358475T"},
                "picture": {
                    "large": "https://randomuser.me/api/portraits/women/62.jpg",
                    "medium": "https://randomuser.me/api/portraits/med/women/62.jpg",
                    "thumbnail": "https://randomuser.me/api/portraits/thumb/women/62.jpg"
                },
                "nat": "GB"
            }
        ],
        "info": {"page": 1, "results": 1}
    })
}

/// Error body in the listing API's format
pub fn error_json_response(message: &str) -> serde_json::Value {
    json!({ "message": message })
}

/// Mock HTTP server for testing
pub struct MockServer {
    pub server: wiremock::MockServer,
}

impl MockServer {
    /// Start a new mock server
    ///
    /// Uses a dedicated (non-pooled) server so that dropping it actually
    /// closes the listener, which transport-failure tests rely on.
    pub async fn start() -> Self {
        let server = wiremock::MockServer::builder().start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Create a client resolving relative paths against this mock server
    pub fn test_client(&self) -> crate::client::HttpClient {
        crate::client::HttpClient::builder()
            .base_url(self.base_url())
            .build()
    }
}
