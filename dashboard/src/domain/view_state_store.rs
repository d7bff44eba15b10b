//! Single entry point for reading and changing the list view state.

use std::sync::Arc;

use pagination::PageNumber;
use tracing::debug;

use super::ports::QueryLocation;
use super::{SortField, SortOrder, ViewState, ViewStateUpdate};

/// What an update did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewStateChange {
    /// New page when the update moved to a different page.
    ///
    /// This is the only signal that asks the list fetcher for another page.
    pub page_changed: Option<PageNumber>,
}

/// Holds the [`ViewState`] and mirrors it into the query string.
///
/// The state is read from the location once, at construction. Every
/// [`update`](Self::update) and [`reset`](Self::reset) re-serialises all
/// fields and replaces the query string without navigating.
///
/// ## Reset policy
/// [`reset`](Self::reset) restores every field to its default except the view
/// mode. Card/table layout is a UI preference, not a filter.
pub struct ViewStateStore<L> {
    location: Arc<L>,
    state: ViewState,
}

impl<L> ViewStateStore<L>
where
    L: QueryLocation,
{
    /// Initialise from the location's current query string.
    pub fn new(location: Arc<L>) -> Self {
        let state = ViewState::from_query(&location.query());
        debug!(query = %state.to_query(), "view state restored from location");
        Self { location, state }
    }

    /// Current state.
    #[must_use]
    pub const fn get(&self) -> &ViewState {
        &self.state
    }

    /// Set one field and write the whole state back to the location.
    pub fn update(&mut self, update: ViewStateUpdate) -> ViewStateChange {
        let before = self.state.page();
        debug!(key = update.key(), "view state update");
        self.state.apply(update);
        self.commit(before)
    }

    /// Parse a raw key/value pair and apply it.
    ///
    /// Unknown keys leave the state and the location untouched.
    pub fn update_from_pair(&mut self, key: &str, value: &str) -> ViewStateChange {
        match ViewStateUpdate::from_pair(key, value) {
            Some(update) => self.update(update),
            None => {
                debug!(key, "ignoring unknown view state key");
                ViewStateChange { page_changed: None }
            }
        }
    }

    /// Column-header sort: choosing the active field reverses the order,
    /// choosing another field sorts by it ascending.
    ///
    /// The query string is written once and the page is left alone.
    pub fn toggle_sort(&mut self, field: SortField) -> ViewStateChange {
        let before = self.state.page();
        if self.state.sort_by() == field {
            let order = self.state.sort_order().reversed();
            self.state.apply(ViewStateUpdate::SortOrder(order));
        } else {
            self.state.apply(ViewStateUpdate::SortBy(field));
            self.state.apply(ViewStateUpdate::SortOrder(SortOrder::Asc));
        }
        debug!(sort_by = %field, sort_order = %self.state.sort_order(), "sort toggled");
        self.commit(before)
    }

    /// Restore defaults, keeping the view mode.
    pub fn reset(&mut self) -> ViewStateChange {
        let before = self.state.page();
        self.state = self.state.reset_filters();
        self.commit(before)
    }

    fn commit(&self, before: PageNumber) -> ViewStateChange {
        self.location.replace_query(&self.state.to_query());
        let after = self.state.page();
        ViewStateChange {
            page_changed: (after != before).then_some(after),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockQueryLocation;
    use crate::domain::ViewMode;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn location_with(query: &'static str) -> MockQueryLocation {
        let mut location = MockQueryLocation::new();
        location.expect_query().return_const(query.to_owned());
        location
    }

    #[test]
    fn restores_state_without_rewriting_location() {
        let mut location = location_with("?sortBy=email&page=3");
        location.expect_replace_query().never();

        let store = ViewStateStore::new(Arc::new(location));
        assert_eq!(store.get().sort_by(), SortField::Email);
        assert_eq!(store.get().page().get(), 3);
    }

    #[test]
    fn update_writes_every_field_back() {
        let mut location = location_with("view=table");
        location
            .expect_replace_query()
            .with(eq("search=ali&domain=&sortBy=id&sortOrder=asc&page=1&view=table"))
            .times(1)
            .return_const(());

        let mut store = ViewStateStore::new(Arc::new(location));
        let change = store.update(ViewStateUpdate::Search("ali".to_owned()));
        assert_eq!(change.page_changed, None);
    }

    #[test]
    fn page_updates_report_the_new_page() {
        let mut location = location_with("");
        location.expect_replace_query().times(2).return_const(());

        let mut store = ViewStateStore::new(Arc::new(location));
        let moved = store.update_from_pair("page", "2");
        assert_eq!(moved.page_changed, PageNumber::new(2).ok());

        let same = store.update(ViewStateUpdate::Page(PageNumber::clamped(2)));
        assert_eq!(same.page_changed, None);
    }

    #[test]
    fn unknown_keys_do_not_touch_the_location() {
        let mut location = location_with("");
        location.expect_replace_query().never();

        let mut store = ViewStateStore::new(Arc::new(location));
        let change = store.update_from_pair("colour", "red");
        assert_eq!(change.page_changed, None);
        assert_eq!(store.get(), &ViewState::default());
    }

    #[test]
    fn reset_preserves_view_mode_and_returns_to_first_page() {
        let mut location = location_with("search=x&page=4&view=table");
        location
            .expect_replace_query()
            .with(eq("search=&domain=&sortBy=id&sortOrder=asc&page=1&view=table"))
            .times(1)
            .return_const(());

        let mut store = ViewStateStore::new(Arc::new(location));
        let change = store.reset();
        assert_eq!(store.get().view(), ViewMode::Table);
        assert_eq!(change.page_changed, Some(PageNumber::FIRST));
    }

    #[rstest]
    #[case::active_field_flips_order(
        "sortBy=last_name&sortOrder=asc&page=2",
        SortField::LastName,
        "search=&domain=&sortBy=last_name&sortOrder=desc&page=2&view=card"
    )]
    #[case::active_field_flips_back(
        "sortBy=email&sortOrder=desc&page=2",
        SortField::Email,
        "search=&domain=&sortBy=email&sortOrder=asc&page=2&view=card"
    )]
    #[case::new_field_resets_to_ascending(
        "sortBy=last_name&sortOrder=desc&page=2",
        SortField::FirstName,
        "search=&domain=&sortBy=first_name&sortOrder=asc&page=2&view=card"
    )]
    fn toggle_sort_writes_the_query_once(
        #[case] initial: &'static str,
        #[case] field: SortField,
        #[case] expected: &'static str,
    ) {
        let mut location = location_with(initial);
        location
            .expect_replace_query()
            .with(eq(expected))
            .times(1)
            .return_const(());

        let mut store = ViewStateStore::new(Arc::new(location));
        let change = store.toggle_sort(field);
        assert_eq!(change.page_changed, None);
        assert_eq!(store.get().sort_by(), field);
    }
}
