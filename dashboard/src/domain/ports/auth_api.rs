//! Driven port for the remote authentication endpoints.

use async_trait::async_trait;

use crate::domain::{ApiFailure, AuthToken, LoginCredentials, RegisteredAccount, Registration};

/// Remote login, registration, and logout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /login`, yielding a session token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, ApiFailure>;

    /// `POST /register`, yielding the new account id and a session token.
    async fn register(&self, registration: &Registration)
    -> Result<RegisteredAccount, ApiFailure>;

    /// `POST /logout`.
    async fn logout(&self) -> Result<(), ApiFailure>;
}
