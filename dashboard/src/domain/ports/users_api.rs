//! Driven port for the remote user collection.
//!
//! The list fetcher and mutation coordinator call this port without knowing
//! the transport. Production backs it with the reqwest adapter; tests use a
//! mock or the in-memory collection from `test_support`.

use async_trait::async_trait;
use pagination::PageNumber;

use crate::domain::{
    ApiFailure, CreatedUser, UpdatedUser, UserDetail, UserDraft, UserId, UsersPage,
};

/// Remote CRUD operations on users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// `GET /users?page={page}`.
    async fn list_users(&self, page: PageNumber) -> Result<UsersPage, ApiFailure>;

    /// `GET /users/{id}`. A missing record fails with a not-found
    /// [`ApiFailure`].
    async fn get_user(&self, id: UserId) -> Result<UserDetail, ApiFailure>;

    /// `POST /users`.
    async fn create_user(&self, draft: &UserDraft) -> Result<CreatedUser, ApiFailure>;

    /// `PUT /users/{id}`.
    async fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<UpdatedUser, ApiFailure>;

    /// `DELETE /users/{id}`.
    async fn delete_user(&self, id: UserId) -> Result<(), ApiFailure>;
}
