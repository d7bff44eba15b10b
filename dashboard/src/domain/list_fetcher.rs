//! Page-at-a-time fetching of the user collection.
//!
//! The fetcher owns the page cache. Only its own commit path and
//! [`ListInvalidation::invalidate`] mutate the cache; everything else reads.
//!
//! ## Ordering
//! - Concurrent requests for the same page share one network call.
//! - Different pages may complete in any order. A response is committed only
//!   if its page is still the selected page and no invalidation happened while
//!   it was in flight; otherwise it is discarded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use pagination::PageNumber;
use thiserror::Error;
use tracing::{debug, warn};

use super::ports::{ListInvalidation, UsersApi};
use super::{ApiFailure, UsersPage};

type PageFuture = Shared<BoxFuture<'static, Result<Arc<UsersPage>, ApiFailure>>>;

/// Why a page read produced no committed page.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The remote call failed.
    #[error(transparent)]
    Failed(#[from] ApiFailure),
    /// The operator moved to another page before the response arrived.
    #[error("response for page {requested} arrived after page {selected} was selected")]
    Superseded {
        /// Page the discarded response belongs to.
        requested: PageNumber,
        /// Page selected when it arrived.
        selected: PageNumber,
    },
    /// The cache was invalidated while the request was in flight.
    #[error("response for page {requested} predates a cache invalidation")]
    Invalidated {
        /// Page the discarded response belongs to.
        requested: PageNumber,
    },
}

/// Observable state of the selected page.
#[derive(Debug, Clone, PartialEq)]
pub enum ListStatus {
    /// Nothing requested yet.
    Idle,
    /// A request for the selected page is in flight.
    Loading,
    /// The selected page is cached.
    Ready(Arc<UsersPage>),
    /// The last request for the selected page failed.
    Failed(ApiFailure),
}

struct InFlight {
    request_id: u64,
    generation: u64,
    future: PageFuture,
}

struct FetcherState {
    selected: PageNumber,
    generation: u64,
    next_request_id: u64,
    cache: HashMap<PageNumber, Arc<UsersPage>>,
    in_flight: HashMap<PageNumber, InFlight>,
    last_error: Option<(PageNumber, ApiFailure)>,
}

/// Fetches, de-duplicates, and caches pages of users.
pub struct ListFetcher<A> {
    api: Arc<A>,
    state: Mutex<FetcherState>,
}

impl<A> ListFetcher<A> {
    /// Create a fetcher with `selected` as the current page.
    pub fn new(api: Arc<A>, selected: PageNumber) -> Self {
        Self {
            api,
            state: Mutex::new(FetcherState {
                selected,
                generation: 0,
                next_request_id: 0,
                cache: HashMap::new(),
                in_flight: HashMap::new(),
                last_error: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FetcherState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Page the operator is looking at.
    pub fn selected(&self) -> PageNumber {
        self.lock().selected
    }

    /// Change the page the operator is looking at.
    ///
    /// Responses for any other page that arrive afterwards are discarded.
    pub fn select_page(&self, page: PageNumber) {
        let mut state = self.lock();
        if state.selected != page {
            debug!(from = %state.selected, to = %page, "selected page changed");
            state.selected = page;
        }
    }

    /// Cached copy of the selected page, if any.
    pub fn current(&self) -> Option<Arc<UsersPage>> {
        let state = self.lock();
        state.cache.get(&state.selected).cloned()
    }

    /// Loading, error, or data state of the selected page.
    pub fn status(&self) -> ListStatus {
        let state = self.lock();
        let page = state.selected;
        if let Some(cached) = state.cache.get(&page) {
            return ListStatus::Ready(Arc::clone(cached));
        }
        if state.in_flight.contains_key(&page) {
            return ListStatus::Loading;
        }
        match &state.last_error {
            Some((failed_page, failure)) if *failed_page == page => {
                ListStatus::Failed(failure.clone())
            }
            _ => ListStatus::Idle,
        }
    }

    /// Whether a request for `page` is in flight.
    pub fn is_pending(&self, page: PageNumber) -> bool {
        self.lock().in_flight.contains_key(&page)
    }
}

impl<A> ListFetcher<A>
where
    A: UsersApi + 'static,
{
    /// Read `page`, from the cache when possible.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Failed`] when the remote call fails, or one of the
    /// discard variants when the response is stale.
    pub async fn fetch_page(&self, page: PageNumber) -> Result<Arc<UsersPage>, FetchError> {
        let (request_id, generation, future) = {
            let mut state = self.lock();
            if let Some(cached) = state.cache.get(&page) {
                return Ok(Arc::clone(cached));
            }
            match state.in_flight.get(&page) {
                Some(flight) => {
                    debug!(%page, "joining in-flight page request");
                    (flight.request_id, flight.generation, flight.future.clone())
                }
                None => {
                    let request_id = state.next_request_id;
                    state.next_request_id = request_id.wrapping_add(1);
                    let generation = state.generation;
                    let future = self.request(page);
                    state.in_flight.insert(
                        page,
                        InFlight {
                            request_id,
                            generation,
                            future: future.clone(),
                        },
                    );
                    (request_id, generation, future)
                }
            }
        };

        let outcome = future.await;
        self.commit(page, request_id, generation, outcome)
    }

    /// Re-request the selected page, ignoring any cached copy.
    ///
    /// Other cached pages are left alone.
    ///
    /// # Errors
    ///
    /// As for [`fetch_page`](Self::fetch_page).
    pub async fn refetch(&self) -> Result<Arc<UsersPage>, FetchError> {
        let page = {
            let mut state = self.lock();
            let page = state.selected;
            state.cache.remove(&page);
            if state
                .last_error
                .as_ref()
                .is_some_and(|(failed_page, _)| *failed_page == page)
            {
                state.last_error = None;
            }
            page
        };
        debug!(%page, "refetching selected page");
        self.fetch_page(page).await
    }

    fn request(&self, page: PageNumber) -> PageFuture {
        let api = Arc::clone(&self.api);
        async move {
            debug!(%page, "requesting users page");
            api.list_users(page).await.map(Arc::new)
        }
        .boxed()
        .shared()
    }

    fn commit(
        &self,
        page: PageNumber,
        request_id: u64,
        generation: u64,
        outcome: Result<Arc<UsersPage>, ApiFailure>,
    ) -> Result<Arc<UsersPage>, FetchError> {
        let mut state = self.lock();
        if state
            .in_flight
            .get(&page)
            .is_some_and(|flight| flight.request_id == request_id)
        {
            state.in_flight.remove(&page);
        }

        if state.generation != generation {
            debug!(%page, "discarding response that predates invalidation");
            return Err(FetchError::Invalidated { requested: page });
        }
        if state.selected != page {
            debug!(%page, selected = %state.selected, "discarding response for unselected page");
            return Err(FetchError::Superseded {
                requested: page,
                selected: state.selected,
            });
        }

        match outcome {
            Ok(data) => {
                state.cache.insert(page, Arc::clone(&data));
                if state
                    .last_error
                    .as_ref()
                    .is_some_and(|(failed_page, _)| *failed_page == page)
                {
                    state.last_error = None;
                }
                Ok(data)
            }
            Err(failure) => {
                warn!(%page, error = %failure, "users page request failed");
                state.last_error = Some((page, failure.clone()));
                Err(FetchError::Failed(failure))
            }
        }
    }
}

impl<A> ListInvalidation for ListFetcher<A>
where
    A: Send + Sync,
{
    fn invalidate(&self) {
        let mut state = self.lock();
        state.generation = state.generation.wrapping_add(1);
        let dropped = state.cache.len();
        state.cache.clear();
        state.in_flight.clear();
        state.last_error = None;
        debug!(dropped, generation = state.generation, "page cache invalidated");
    }
}

#[cfg(test)]
#[path = "list_fetcher_tests.rs"]
mod tests;
