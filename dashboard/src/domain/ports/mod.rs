//! Domain ports for the hexagonal boundary.

mod auth_api;
mod list_invalidation;
mod query_location;
mod users_api;

#[cfg(test)]
pub use auth_api::MockAuthApi;
pub use auth_api::AuthApi;
#[cfg(test)]
pub use list_invalidation::MockListInvalidation;
pub use list_invalidation::ListInvalidation;
#[cfg(test)]
pub use query_location::MockQueryLocation;
pub use query_location::QueryLocation;
#[cfg(test)]
pub use users_api::MockUsersApi;
pub use users_api::UsersApi;
