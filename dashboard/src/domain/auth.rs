//! Authentication primitives: credentials, registration, and API tokens.
//!
//! Form input is validated here before an auth service talks to a port, so
//! validation failures never reach the network.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use zeroize::Zeroizing;

use super::UserId;

/// Minimum login password length.
pub const LOGIN_PASSWORD_MIN: usize = 6;
/// Maximum login password length.
pub const LOGIN_PASSWORD_MAX: usize = 100;
/// Minimum registration password length.
pub const REGISTER_PASSWORD_MIN: usize = 5;
/// Maximum registration password length.
pub const REGISTER_PASSWORD_MAX: usize = 20;

/// Errors returned when login or registration input is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email is required")]
    EmptyEmail,
    /// Email is not shaped like an address.
    #[error("email is invalid")]
    InvalidEmail,
    /// Password was empty.
    #[error("password is required")]
    EmptyPassword,
    /// Password length is outside the accepted range.
    #[error("password must be between {min} and {max} characters")]
    PasswordLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// Registration passwords need at least one lowercase letter.
    #[error("password must contain a lowercase letter")]
    PasswordMissingLowercase,
    /// Confirmation was empty.
    #[error("password confirmation is required")]
    EmptyConfirmation,
    /// Confirmation differs from the password.
    #[error("passwords do not match")]
    PasswordMismatch,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn validate_email(email: &str) -> Result<String, CredentialsValidationError> {
    let normalized = email.trim();
    if normalized.is_empty() {
        return Err(CredentialsValidationError::EmptyEmail);
    }
    if !email_regex().is_match(normalized) {
        return Err(CredentialsValidationError::InvalidEmail);
    }
    Ok(normalized.to_owned())
}

fn validate_length(
    password: &str,
    min: usize,
    max: usize,
) -> Result<(), CredentialsValidationError> {
    let length = password.chars().count();
    if length == 0 {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    if !(min..=max).contains(&length) {
        return Err(CredentialsValidationError::PasswordLength { min, max });
    }
    Ok(())
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and shaped like an address.
/// - `password` holds [`LOGIN_PASSWORD_MIN`]..=[`LOGIN_PASSWORD_MAX`]
///   characters and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use dashboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" eve.holt@reqres.in ", "cityslicka").unwrap();
/// assert_eq!(creds.email(), "eve.holt@reqres.in");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form input.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialsValidationError`] for the first invalid field.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = validate_email(email)?;
        validate_length(password, LOGIN_PASSWORD_MIN, LOGIN_PASSWORD_MAX)?;
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as entered.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated registration request.
///
/// ## Invariants
/// - `email` is trimmed and shaped like an address.
/// - `password` holds [`REGISTER_PASSWORD_MIN`]..=[`REGISTER_PASSWORD_MAX`]
///   characters, at least one of them a lowercase letter, and matched its
///   confirmation.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    email: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw form input.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialsValidationError`] for the first invalid field.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let email = validate_email(email)?;
        validate_length(password, REGISTER_PASSWORD_MIN, REGISTER_PASSWORD_MAX)?;
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(CredentialsValidationError::PasswordMissingLowercase);
        }
        if confirmation.is_empty() {
            return Err(CredentialsValidationError::EmptyConfirmation);
        }
        if confirmation != password {
            return Err(CredentialsValidationError::PasswordMismatch);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token issued by the remote API.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Wrap a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Token value for request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Account created by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAccount {
    /// Identifier of the new account.
    pub id: UserId,
    /// Token for the new session.
    pub token: AuthToken,
}
