//! Users list controller wiring the view state, fetcher, and engine together.
//!
//! The controller is the only place that turns a view-state page change into a
//! fetcher page selection. Every method takes `&self` so navigation can happen
//! while a load is still awaiting the network.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pagination::{PageLink, PageStats, visible_pages};
use tracing::debug;

use super::list_fetcher::{FetchError, ListFetcher, ListStatus};
use super::mutations::MutationCoordinator;
use super::ports::{QueryLocation, UsersApi};
use super::user_lookup::lookup_user;
use super::view_state_store::{ViewStateChange, ViewStateStore};
use super::{
    ApiFailure, DisplayedSet, DomainDistribution, SortField, UserId, UserLookup, ViewState,
    ViewStateUpdate,
};

/// View model behind the users list screen.
pub struct UsersDashboard<A, L> {
    api: Arc<A>,
    view: Mutex<ViewStateStore<L>>,
    fetcher: Arc<ListFetcher<A>>,
    mutations: MutationCoordinator<A, ListFetcher<A>>,
}

impl<A, L> UsersDashboard<A, L>
where
    A: UsersApi + 'static,
    L: QueryLocation,
{
    /// Restore the view state from `location` and select its page.
    pub fn new(api: Arc<A>, location: Arc<L>) -> Self {
        let view = ViewStateStore::new(location);
        let fetcher = Arc::new(ListFetcher::new(Arc::clone(&api), view.get().page()));
        let mutations = MutationCoordinator::new(Arc::clone(&api), Arc::clone(&fetcher));
        Self {
            api,
            view: Mutex::new(view),
            fetcher,
            mutations,
        }
    }

    fn view(&self) -> MutexGuard<'_, ViewStateStore<L>> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current view state.
    pub fn view_state(&self) -> ViewState {
        self.view().get().clone()
    }

    /// Apply one field change.
    pub fn update(&self, update: ViewStateUpdate) -> ViewStateChange {
        let change = self.view().update(update);
        self.follow(change)
    }

    /// Apply a raw query key/value pair; unknown keys are ignored.
    pub fn update_from_pair(&self, key: &str, value: &str) -> ViewStateChange {
        let change = self.view().update_from_pair(key, value);
        self.follow(change)
    }

    /// Column-header sort; see [`ViewStateStore::toggle_sort`].
    pub fn toggle_sort(&self, field: SortField) -> ViewStateChange {
        let change = self.view().toggle_sort(field);
        self.follow(change)
    }

    /// Clear filters, sorting, and page, keeping the view mode.
    pub fn reset(&self) -> ViewStateChange {
        let change = self.view().reset();
        self.follow(change)
    }

    fn follow(&self, change: ViewStateChange) -> ViewStateChange {
        if let Some(page) = change.page_changed {
            self.fetcher.select_page(page);
        }
        change
    }

    /// Fetch the selected page if needed and compute what to display.
    ///
    /// # Errors
    ///
    /// See [`ListFetcher::fetch_page`]. A navigation during the request yields
    /// [`FetchError::Superseded`].
    ///
    /// A response discarded because a mutation invalidated the list mid-flight
    /// is read again once, so callers only see [`FetchError::Invalidated`] when
    /// a second invalidation lands during the retry.
    pub async fn load(&self) -> Result<DisplayedSet, FetchError> {
        let page = self.fetcher.selected();
        let data = match self.fetcher.fetch_page(page).await {
            Err(FetchError::Invalidated { requested }) => {
                debug!(page = %requested, "list invalidated during load; reading again");
                self.fetcher.fetch_page(page).await?
            }
            outcome => outcome?,
        };
        Ok(DisplayedSet::from_page(&data, self.view().get()))
    }

    /// Bypass the cache for the selected page and recompute.
    ///
    /// # Errors
    ///
    /// See [`ListFetcher::refetch`].
    pub async fn refetch(&self) -> Result<DisplayedSet, FetchError> {
        let data = self.fetcher.refetch().await?;
        Ok(DisplayedSet::from_page(&data, self.view().get()))
    }

    /// Loading, error, or data state of the selected page.
    pub fn status(&self) -> ListStatus {
        self.fetcher.status()
    }

    /// Display set for the cached selected page, recomputed on every call.
    pub fn displayed(&self) -> Option<DisplayedSet> {
        let data = self.fetcher.current()?;
        Some(DisplayedSet::from_page(&data, self.view().get()))
    }

    /// Summary figures for the cached selected page.
    pub fn page_stats(&self) -> Option<PageStats> {
        self.fetcher.current().map(|data| PageStats::from_page(&data))
    }

    /// Email domains on the cached selected page, before search and filters.
    pub fn domain_distribution(&self) -> Option<DomainDistribution> {
        self.fetcher
            .current()
            .map(|data| DomainDistribution::from_records(data.data()))
    }

    /// Pagination controls for the cached selected page.
    pub fn page_links(&self) -> Vec<PageLink> {
        self.fetcher
            .current()
            .map(|data| visible_pages(data.page(), data.total_pages()))
            .unwrap_or_default()
    }

    /// Create, update, and delete operations bound to this list.
    pub const fn mutations(&self) -> &MutationCoordinator<A, ListFetcher<A>> {
        &self.mutations
    }

    /// Look up one user for the detail view.
    ///
    /// # Errors
    ///
    /// Failures other than not-found are returned unchanged.
    pub async fn lookup(&self, id: UserId) -> Result<UserLookup, ApiFailure> {
        lookup_user(self.api.as_ref(), id).await
    }
}
