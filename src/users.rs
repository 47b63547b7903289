//! User listing service for the Random User API

use std::sync::Arc;

use compact_str::CompactString;
use tracing::{debug, instrument};

use crate::{
    client::{HttpClient, RequestConfig, Result},
    domain::UsersListResponse,
};

/// Default user listing endpoint
pub const RANDOM_USER_ENDPOINT: &str = "https://randomuser.me/api";

/// Field selectors accepted by the listing endpoint's `inc` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInclude {
    Gender,
    Name,
    Nat,
    Login,
    Location,
    Email,
    Registered,
    Dob,
    Phone,
    Cell,
    Id,
    Picture,
}

impl UserInclude {
    pub fn as_str(self) -> &'static str {
        match self {
            UserInclude::Gender => "gender",
            UserInclude::Name => "name",
            UserInclude::Nat => "nat",
            UserInclude::Login => "login",
            UserInclude::Location => "location",
            UserInclude::Email => "email",
            UserInclude::Registered => "registered",
            UserInclude::Dob => "dob",
            UserInclude::Phone => "phone",
            UserInclude::Cell => "cell",
            UserInclude::Id => "id",
            UserInclude::Picture => "picture",
        }
    }
}

/// Query parameters for fetching a page of users
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Page number to fetch
    pub page: Option<u32>,
    /// Number of results per page
    pub results: Option<u32>,
    /// Fields to include in the response; empty fetches everything
    pub inc: Vec<UserInclude>,
}

impl UserQuery {
    /// Create a new user query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    pub fn with_results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }

    /// Restrict the response to the given fields
    pub fn with_includes(mut self, fields: impl IntoIterator<Item = UserInclude>) -> Self {
        self.inc.extend(fields);
        self
    }

    /// Comma-joined `inc` parameter value, when any selectors are set
    fn inc_param(&self) -> Option<CompactString> {
        if self.inc.is_empty() {
            return None;
        }

        let mut joined = CompactString::default();
        for (i, field) in self.inc.iter().enumerate() {
            if i > 0 {
                joined.push_str(", ");
            }
            joined.push_str(field.as_str());
        }
        Some(joined)
    }
}

/// Service fetching user pages through a shared [`HttpClient`]
#[derive(Debug, Clone)]
pub struct UserService {
    http: Arc<HttpClient>,
    endpoint: CompactString,
}

impl UserService {
    /// Create a service against the default randomuser.me endpoint
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            endpoint: RANDOM_USER_ENDPOINT.into(),
        }
    }

    /// Point the service at a different listing endpoint (self-hosted mirror)
    pub fn with_endpoint(mut self, endpoint: impl Into<CompactString>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Fetch one page of users
    #[instrument(skip(self, query), fields(page = ?query.page, results = ?query.results))]
    pub async fn get_users(&self, query: &UserQuery) -> Result<UsersListResponse> {
        let mut config = RequestConfig::get(self.endpoint.clone());

        if let Some(page) = query.page {
            config = config.with_param("page", page);
        }
        if let Some(results) = query.results {
            config = config.with_param("results", results);
        }
        if let Some(inc) = query.inc_param() {
            config = config.with_param("inc", inc);
        }

        let response = self.http.request(config).await?;
        let data: UsersListResponse = response.data.json()?;

        debug!(
            user_count = data.results.len(),
            page = data.info.page,
            "fetched users"
        );
        Ok(data)
    }
}
