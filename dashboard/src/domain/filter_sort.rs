//! Client-side search, filter, and sort over the fetched page.
//!
//! Filtering only sees the records of the page currently held in memory; it
//! does not search across the whole collection. This mirrors the remote API,
//! which offers no server-side filtering.

use std::cmp::Ordering;

use super::{SortField, SortOrder, UserRecord, UsersPage, ViewState};

/// Compute the records to display for `page` under `view`.
///
/// Steps run in a fixed order:
/// 1. a non-empty search keeps records whose lowercased first name, last
///    name, or email contains the lowercased term;
/// 2. a non-empty domain keeps records whose email contains it;
/// 3. a stable sort by the selected field, case-insensitive for text and
///    numeric for ids, reversed for descending order.
///
/// The function is pure: equal inputs always produce equal outputs.
///
/// # Examples
/// ```
/// use dashboard::domain::{compute, UserId, UserRecord, UsersPage, ViewState};
/// use pagination::PageNumber;
///
/// let records = vec![
///     UserRecord::new(UserId::new(1), "Zed", "Zeta", "a@x.com", None),
///     UserRecord::new(UserId::new(2), "Zed", "Zeta", "b@y.com", None),
/// ];
/// let page = UsersPage::new(records, PageNumber::FIRST, 6, 2, 1);
/// let shown = compute(&page, &ViewState::from_query("domain=y.com"));
/// assert_eq!(shown.len(), 1);
/// assert_eq!(shown[0].email(), "b@y.com");
/// ```
#[must_use]
pub fn compute(page: &UsersPage, view: &ViewState) -> Vec<UserRecord> {
    let search = view.search().to_lowercase();
    let domain = view.domain();

    let mut shown: Vec<UserRecord> = page
        .data()
        .iter()
        .filter(|record| search.is_empty() || matches_search(record, &search))
        .filter(|record| domain.is_empty() || record.email().contains(domain))
        .cloned()
        .collect();

    let field = view.sort_by();
    let order = view.sort_order();
    shown.sort_by(|a, b| {
        let ordering = compare(field, a, b);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    shown
}

fn matches_search(record: &UserRecord, term: &str) -> bool {
    [record.first_name(), record.last_name(), record.email()]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

fn compare(field: SortField, a: &UserRecord, b: &UserRecord) -> Ordering {
    match field {
        SortField::Id => a.id().cmp(&b.id()),
        SortField::FirstName => compare_text(a.first_name(), b.first_name()),
        SortField::LastName => compare_text(a.last_name(), b.last_name()),
        SortField::Email => compare_text(a.email(), b.email()),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Whether the list has anything to show, and why not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOutcome {
    /// The page holds no records at all.
    NoRecords,
    /// Records exist but the current search or filter excluded all of them.
    NoMatches,
    /// At least one record is shown.
    Records,
}

/// Records to render plus enough context to explain an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedSet {
    records: Vec<UserRecord>,
    source_len: usize,
}

impl DisplayedSet {
    /// Run [`compute`] and remember how many records the page held.
    #[must_use]
    pub fn from_page(page: &UsersPage, view: &ViewState) -> Self {
        Self {
            records: compute(page, view),
            source_len: page.data().len(),
        }
    }

    /// Records in display order.
    #[must_use]
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    /// Number of records on the fetched page before filtering.
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source_len
    }

    /// Distinguish "nothing exists" from "filters matched nothing".
    #[must_use]
    pub fn outcome(&self) -> DisplayOutcome {
        if self.source_len == 0 {
            DisplayOutcome::NoRecords
        } else if self.records.is_empty() {
            DisplayOutcome::NoMatches
        } else {
            DisplayOutcome::Records
        }
    }
}

#[cfg(test)]
#[path = "filter_sort_tests.rs"]
mod tests;
