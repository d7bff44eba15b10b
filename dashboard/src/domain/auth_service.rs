//! Login, registration, and logout against the remote auth endpoints.
//!
//! Credentials are validated by construction, so every call here already
//! holds well-formed input. The service writes results into the caller's
//! [`SessionContext`].

use std::sync::Arc;

use tracing::{info, warn};

use super::ports::AuthApi;
use super::{ApiFailure, LoginCredentials, RegisteredAccount, Registration, SessionContext, UserId};

/// Authentication service over an [`AuthApi`] port.
#[derive(Clone)]
pub struct AuthService<A> {
    api: Arc<A>,
}

impl<A> AuthService<A> {
    /// Create a service that talks to `api`.
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A> AuthService<A>
where
    A: AuthApi,
{
    /// Log in and store the token in `session`.
    ///
    /// # Errors
    ///
    /// Passes the API failure through; `session` is left untouched.
    pub async fn login(
        &self,
        session: &mut SessionContext,
        credentials: &LoginCredentials,
    ) -> Result<(), ApiFailure> {
        let token = self.api.login(credentials).await.inspect_err(|failure| {
            warn!(status = ?failure.status(), error = %failure, "login rejected");
        })?;
        session.sign_in(credentials.email(), token);
        info!("operator signed in");
        Ok(())
    }

    /// Register an account and sign it in.
    ///
    /// # Errors
    ///
    /// Passes the API failure through; `session` is left untouched.
    pub async fn register(
        &self,
        session: &mut SessionContext,
        registration: &Registration,
    ) -> Result<UserId, ApiFailure> {
        let RegisteredAccount { id, token } =
            self.api.register(registration).await.inspect_err(|failure| {
                warn!(status = ?failure.status(), error = %failure, "registration rejected");
            })?;
        session.sign_in(registration.email(), token);
        info!(%id, "account registered");
        Ok(id)
    }

    /// Log out. The remote call is best-effort; `session` is always cleared.
    pub async fn logout(&self, session: &mut SessionContext) {
        if let Err(failure) = self.api.logout().await {
            warn!(error = %failure, "remote logout failed; clearing session anyway");
        }
        session.sign_out();
    }
}
