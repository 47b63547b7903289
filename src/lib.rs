//! Paginated client for the randomuser.me user-listing API.
//!
//! Two pieces: an [`HttpClient`] abstraction (URL resolution, query and body
//! serialization, content-type aware response parsing, one normalized error
//! shape with global error observers) and a paginated feed
//! ([`feed::UserFeed`]) that accumulates pages of users behind a single
//! in-flight guard.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use userfeed::{HttpClient, UserFeed, UserQuery, UserService};
//!
//! # async fn example() -> userfeed::Result<()> {
//! let mut client = HttpClient::new();
//! client.on_error(|error| eprintln!("request failed: {error}"));
//!
//! let service = UserService::new(Arc::new(client));
//! let feed = UserFeed::new(service).with_page_size(25);
//!
//! feed.fetch_next(UserQuery::new()).await?;
//! println!("{} users loaded", feed.users().len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod domain;
pub mod feed;
pub mod users;

pub use client::{
    ClientError, ContentKind, HttpClient, HttpClientBuilder, HttpResponse, RequestBody,
    RequestConfig, RequestMethod, ResponseData, Result,
};
pub use domain::{ResponseInfo, UserDto, UsersListResponse};
pub use feed::{DataList, PageState, UserFeed};
pub use users::{UserInclude, UserQuery, UserService, RANDOM_USER_ENDPOINT};
