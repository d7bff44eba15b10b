//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **reqres**: reqwest-backed users and auth API client
//! - **location**: in-process query string holder for non-browser hosts
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic.

pub mod location;
pub mod reqres;
