//! Search, filter, sort, page, and view-mode selection for the users list.
//!
//! The view state lives in the query string so a reload or a shared link
//! restores it. Parsing is total: malformed or out-of-range values fall back
//! to the documented defaults at the boundary and never surface as errors.

use std::fmt;

use pagination::PageNumber;
use url::form_urlencoded;

/// Query-string key for the free-text search.
pub const SEARCH_KEY: &str = "search";
/// Query-string key for the email domain filter.
pub const DOMAIN_KEY: &str = "domain";
/// Query-string key for the sort field.
pub const SORT_BY_KEY: &str = "sortBy";
/// Query-string key for the sort direction.
pub const SORT_ORDER_KEY: &str = "sortOrder";
/// Query-string key for the page number.
pub const PAGE_KEY: &str = "page";
/// Query-string key for the view mode.
pub const VIEW_KEY: &str = "view";

macro_rules! query_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Value written to the query string.
            #[must_use]
            pub const fn as_query_value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            /// Parse a query-string value, returning `None` for anything
            /// outside the enumeration.
            #[must_use]
            pub fn from_query_value(raw: &str) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_query_value())
            }
        }
    };
}

query_enum! {
    /// Field the displayed records are ordered by.
    pub enum SortField {
        /// Numeric server id.
        #[default]
        Id => "id",
        /// Given name, case-insensitive.
        FirstName => "first_name",
        /// Family name, case-insensitive.
        LastName => "last_name",
        /// Email address, case-insensitive.
        Email => "email",
    }
}

query_enum! {
    /// Sort direction.
    pub enum SortOrder {
        /// Smallest first.
        #[default]
        Asc => "asc",
        /// Largest first.
        Desc => "desc",
    }
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

query_enum! {
    /// How the list is laid out. A UI preference rather than a filter.
    pub enum ViewMode {
        /// Grid of cards.
        #[default]
        Card => "card",
        /// Dense table.
        Table => "table",
    }
}

/// Current list selection.
///
/// ## Invariants
/// - `page` is at least 1.
/// - `sort_by`, `sort_order`, and `view` are always one of their enumerated
///   values; there is no way to hold an arbitrary string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    search: String,
    domain: String,
    sort_by: SortField,
    sort_order: SortOrder,
    page: PageNumber,
    view: ViewMode,
}

impl ViewState {
    /// Parse a query string such as `search=ali&page=2`, with or without a
    /// leading `?`.
    ///
    /// Unknown keys are ignored and the first occurrence of a repeated key
    /// wins. Invalid values fall back to defaults and pages below 1 clamp to
    /// 1.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::{SortField, ViewState};
    ///
    /// let state = ViewState::from_query("?sortBy=nickname&page=-5");
    /// assert_eq!(state.sort_by(), SortField::Id);
    /// assert_eq!(state.page().get(), 1);
    /// ```
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();
        let mut seen: Vec<String> = Vec::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if seen.iter().any(|existing| *existing == key) {
                continue;
            }
            if let Some(update) = ViewStateUpdate::from_pair(&key, &value) {
                state.apply(update);
                seen.push(key.into_owned());
            }
        }
        state
    }

    /// Serialise every field in a fixed order:
    /// `search, domain, sortBy, sortOrder, page, view`.
    #[must_use]
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(SEARCH_KEY, &self.search)
            .append_pair(DOMAIN_KEY, &self.domain)
            .append_pair(SORT_BY_KEY, self.sort_by.as_query_value())
            .append_pair(SORT_ORDER_KEY, self.sort_order.as_query_value())
            .append_pair(PAGE_KEY, &self.page.to_string())
            .append_pair(VIEW_KEY, self.view.as_query_value())
            .finish()
    }

    /// Free-text search term; empty means no search.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Email domain substring; empty means no domain filter.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Field the list is sorted by.
    #[must_use]
    pub const fn sort_by(&self) -> SortField {
        self.sort_by
    }

    /// Sort direction.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Selected page.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Layout preference.
    #[must_use]
    pub const fn view(&self) -> ViewMode {
        self.view
    }

    /// Set one field.
    pub fn apply(&mut self, update: ViewStateUpdate) {
        match update {
            ViewStateUpdate::Search(search) => self.search = search,
            ViewStateUpdate::Domain(domain) => self.domain = domain,
            ViewStateUpdate::SortBy(sort_by) => self.sort_by = sort_by,
            ViewStateUpdate::SortOrder(sort_order) => self.sort_order = sort_order,
            ViewStateUpdate::Page(page) => self.page = page,
            ViewStateUpdate::View(view) => self.view = view,
        }
    }

    /// Defaults for every filter field, keeping the current view mode.
    #[must_use]
    pub fn reset_filters(&self) -> Self {
        Self {
            view: self.view,
            ..Self::default()
        }
    }
}

/// A change to exactly one [`ViewState`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStateUpdate {
    /// Replace the search term.
    Search(String),
    /// Replace the domain filter.
    Domain(String),
    /// Change the sort field.
    SortBy(SortField),
    /// Change the sort direction.
    SortOrder(SortOrder),
    /// Move to another page.
    Page(PageNumber),
    /// Switch layouts.
    View(ViewMode),
}

impl ViewStateUpdate {
    /// Build an update from a raw key/value pair using the same fallbacks as
    /// [`ViewState::from_query`]. Unknown keys yield `None`.
    #[must_use]
    pub fn from_pair(key: &str, value: &str) -> Option<Self> {
        let update = match key {
            SEARCH_KEY => Self::Search(value.to_owned()),
            DOMAIN_KEY => Self::Domain(value.to_owned()),
            SORT_BY_KEY => Self::SortBy(SortField::from_query_value(value).unwrap_or_default()),
            SORT_ORDER_KEY => {
                Self::SortOrder(SortOrder::from_query_value(value).unwrap_or_default())
            }
            PAGE_KEY => Self::Page(parse_page(value)),
            VIEW_KEY => Self::View(ViewMode::from_query_value(value).unwrap_or_default()),
            _ => return None,
        };
        Some(update)
    }

    /// Query-string key this update targets.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Search(_) => SEARCH_KEY,
            Self::Domain(_) => DOMAIN_KEY,
            Self::SortBy(_) => SORT_BY_KEY,
            Self::SortOrder(_) => SORT_ORDER_KEY,
            Self::Page(_) => PAGE_KEY,
            Self::View(_) => VIEW_KEY,
        }
    }
}

fn parse_page(raw: &str) -> PageNumber {
    raw.trim()
        .parse::<i64>()
        .map_or(PageNumber::FIRST, PageNumber::clamped)
}

#[cfg(test)]
#[path = "view_state_tests.rs"]
mod tests;
