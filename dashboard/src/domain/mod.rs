//! Domain model and services for the users dashboard.
//!
//! Purpose: keep the list view's state, fetching, filtering, and mutation
//! rules independent of transport and presentation. Outbound adapters
//! implement the traits in [`ports`]; inbound adapters drive
//! [`UsersDashboard`], [`AuthService`], and [`MutationCoordinator`].
//!
//! Public surface:
//! - ViewState / ViewStateStore: query-string backed list state.
//! - ListFetcher: per-page fetch with de-duplication, caching, and a
//!   stale-response guard.
//! - compute / DisplayedSet: client-side search, filter, and sort.
//! - DomainDistribution: email domain breakdown of the fetched page.
//! - MutationCoordinator: create, update, and delete with list invalidation.
//! - AuthService / SessionContext: explicit session handling.
//! - ApiFailure: uniform remote failure with message fallback.

pub mod auth;
pub mod auth_service;
pub mod controller;
pub mod email_domains;
pub mod error;
pub mod filter_sort;
pub mod list_fetcher;
pub mod mutations;
pub mod ports;
pub mod session;
pub mod user;
pub mod user_lookup;
pub mod view_state;
pub mod view_state_store;

pub use self::auth::{
    AuthToken, CredentialsValidationError, LoginCredentials, RegisteredAccount, Registration,
};
pub use self::auth_service::AuthService;
pub use self::controller::UsersDashboard;
pub use self::email_domains::{DomainDistribution, DomainShare};
pub use self::error::{ApiFailure, ErrorCode, UNKNOWN_ERROR_MESSAGE};
pub use self::filter_sort::{DisplayOutcome, DisplayedSet, compute};
pub use self::list_fetcher::{FetchError, ListFetcher, ListStatus};
pub use self::mutations::{MutationCoordinator, MutationKind};
pub use self::session::SessionContext;
pub use self::user::{
    CreatedUser, SupportBanner, UpdatedUser, UserDetail, UserDraft, UserId, UserLookup,
    UserRecord, UserValidationError,
};
pub use self::user_lookup::lookup_user;
pub use self::view_state::{SortField, SortOrder, ViewMode, ViewState, ViewStateUpdate};
pub use self::view_state_store::{ViewStateChange, ViewStateStore};

/// One page of user records as returned by `GET /users`.
pub type UsersPage = pagination::Page<UserRecord>;
