//! Explicit session context shared by components that need authentication.
//!
//! The context is an ordinary value handed to whoever needs it. Writers go
//! through [`SessionContext::sign_in`] and [`SessionContext::sign_out`];
//! readers only see the current snapshot.

use super::AuthToken;

/// Authentication state for the current operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    signed_in: Option<SignedIn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SignedIn {
    email: String,
    token: AuthToken,
}

impl SessionContext {
    /// An empty, signed-out session.
    #[must_use]
    pub const fn new() -> Self {
        Self { signed_in: None }
    }

    /// Record a successful login or registration, replacing any prior session.
    pub fn sign_in(&mut self, email: impl Into<String>, token: AuthToken) {
        self.signed_in = Some(SignedIn {
            email: email.into(),
            token,
        });
    }

    /// Forget the current session.
    pub fn sign_out(&mut self) {
        self.signed_in = None;
    }

    /// Whether a token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.signed_in.is_some()
    }

    /// Token of the signed-in operator.
    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        self.signed_in.as_ref().map(|session| &session.token)
    }

    /// Email of the signed-in operator.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.signed_in.as_ref().map(|session| session.email.as_str())
    }
}
