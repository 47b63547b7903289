//! Paginated list accumulation
//!
//! [`DataList`] holds the accumulated items plus the in-flight guard and page
//! counter; [`UserFeed`] binds it to a [`UserService`] and exposes the single
//! "fetch next page" operation.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use tracing::{debug, error, instrument};

use crate::{
    client::Result,
    domain::{ResponseInfo, UserDto},
    users::{UserQuery, UserService},
};

/// Client-tracked pagination cursor
///
/// `page` starts at 0 and is incremented before each fetch; it only
/// increases, even when a fetch fails. Distinct from the server-reported
/// [`ResponseInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: u32,
    pub results: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self { page: 0, results: 10 }
    }
}

type ReplaceHandler<T> = Box<dyn Fn(&[T]) + Send + Sync>;

/// Accumulating, replace-only item list with a single in-flight guard
///
/// Replace is the only mutation primitive: `add_items` concatenates onto a
/// copy and runs it through the same replace path as `set_items`, so the
/// replace callback always observes the full resulting list. That callback is
/// the supply hook for an external persistence collaborator.
pub struct DataList<T> {
    items: Mutex<Vec<T>>,
    loading: AtomicBool,
    page: Mutex<PageState>,
    response_info: Mutex<ResponseInfo>,
    on_replace: Option<ReplaceHandler<T>>,
}

impl<T: Clone> Default for DataList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> DataList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create a list seeded with initial items
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(items),
            loading: AtomicBool::new(false),
            page: Mutex::new(PageState::default()),
            response_info: Mutex::new(ResponseInfo { page: 0, results: 10 }),
            on_replace: None,
        }
    }

    /// Register the replace callback, invoked with the full list whenever it
    /// is replaced. Construction-time only.
    pub fn on_replace(mut self, handler: impl Fn(&[T]) + Send + Sync + 'static) -> Self {
        self.on_replace = Some(Box::new(handler));
        self
    }

    /// Append items by replacing the whole list with the concatenation
    pub fn add_items(&self, new_items: impl IntoIterator<Item = T>) {
        let mut combined = self.items.lock().unwrap().clone();
        combined.extend(new_items);
        self.replace(combined);
    }

    /// Replace the list wholesale
    pub fn set_items(&self, items: Vec<T>) {
        self.replace(items);
    }

    /// Snapshot of the current items
    pub fn items(&self) -> Vec<T> {
        self.items.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    /// Whether a fetch is currently in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Current client-side page state
    pub fn page(&self) -> PageState {
        *self.page.lock().unwrap()
    }

    /// Last server-reported pagination metadata
    pub fn response_info(&self) -> ResponseInfo {
        *self.response_info.lock().unwrap()
    }

    fn replace(&self, items: Vec<T>) {
        *self.items.lock().unwrap() = items;

        if let Some(on_replace) = &self.on_replace {
            // snapshot taken so the callback runs outside the lock
            let snapshot = self.items.lock().unwrap().clone();
            on_replace(&snapshot);
        }
    }

    /// Acquire the in-flight guard; `None` while a fetch is pending
    fn try_begin_load(&self) -> Option<LoadGuard<'_>> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadGuard(&self.loading))
    }

    /// Advance the page counter and return the state driving the next fetch
    fn advance_page(&self) -> PageState {
        let mut page = self.page.lock().unwrap();
        page.page += 1;
        *page
    }

    fn set_page_size(&self, results: u32) {
        self.page.lock().unwrap().results = results;
    }

    fn record_info(&self, info: ResponseInfo) {
        *self.response_info.lock().unwrap() = info;
    }
}

/// Clears the loading flag on every exit path, success or failure
struct LoadGuard<'a>(&'a AtomicBool);

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Paginated user feed
///
/// Accumulates pages from a [`UserService`] into a [`DataList`], one fetch in
/// flight at a time.
pub struct UserFeed {
    service: UserService,
    list: DataList<UserDto>,
}

impl UserFeed {
    /// Create a feed over the given service
    pub fn new(service: UserService) -> Self {
        Self {
            service,
            list: DataList::new(),
        }
    }

    /// Override the number of users fetched per page
    pub fn with_page_size(self, results: u32) -> Self {
        self.list.set_page_size(results);
        self
    }

    /// Register the replace callback on the underlying list
    pub fn on_replace(mut self, handler: impl Fn(&[UserDto]) + Send + Sync + 'static) -> Self {
        self.list = self.list.on_replace(handler);
        self
    }

    /// Fetch the next page of users
    ///
    /// A no-op returning `Ok(())` while a previous fetch is still in flight;
    /// the page counter does not advance a second time until that fetch
    /// settles. Fetch errors propagate to the caller after the loading flag
    /// has been cleared.
    #[instrument(skip(self, extra))]
    pub async fn fetch_next(&self, extra: UserQuery) -> Result<()> {
        let Some(_guard) = self.list.try_begin_load() else {
            debug!("fetch already in flight, dropping request");
            return Ok(());
        };

        let page = self.list.advance_page();
        let query = extra.with_page(page.page).with_results(page.results);

        match self.service.get_users(&query).await {
            Ok(data) => {
                debug!(
                    user_count = data.results.len(),
                    page = page.page,
                    "appending fetched users"
                );
                self.list.add_items(data.results);
                self.list.record_info(data.info);
                Ok(())
            },
            Err(e) => {
                error!(error = %e, page = page.page, "failed to fetch users");
                Err(e)
            },
        }
    }

    /// Snapshot of the accumulated users
    pub fn users(&self) -> Vec<UserDto> {
        self.list.items()
    }

    /// Whether a fetch is currently in flight
    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    /// The underlying list storage
    pub fn list(&self) -> &DataList<UserDto> {
        &self.list
    }
}
