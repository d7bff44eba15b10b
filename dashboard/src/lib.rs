//! Users dashboard client core.
//!
//! The [`domain`] module holds the list view model: URL-backed view state,
//! page fetching with de-duplication and stale-response protection,
//! client-side filtering and sorting, mutations, and session handling.
//! [`outbound`] adapts it to a reqres-compatible HTTP API and [`inbound`]
//! drives it from the command line.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
