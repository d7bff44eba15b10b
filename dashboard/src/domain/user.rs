//! User records and the drafts submitted to create or update them.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Minimum length of a draft's name, in characters.
pub const NAME_MIN: usize = 2;
/// Maximum length of a draft's name, in characters.
pub const NAME_MAX: usize = 100;
/// Minimum length of a draft's job title, in characters.
pub const JOB_MIN: usize = 2;
/// Maximum length of a draft's job title, in characters.
pub const JOB_MAX: usize = 50;

/// Validation errors returned by [`UserDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Name was blank once trimmed.
    #[error("name is required")]
    EmptyName,
    /// Name is shorter than [`NAME_MIN`].
    #[error("name must be at least {min} characters")]
    NameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Name is longer than [`NAME_MAX`].
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Job was blank once trimmed.
    #[error("job is required")]
    EmptyJob,
    /// Job is shorter than [`JOB_MIN`].
    #[error("job must be at least {min} characters")]
    JobTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Job is longer than [`JOB_MAX`].
    #[error("job must be at most {max} characters")]
    JobTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

/// Server-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u64);

impl UserId {
    /// Wrap an identifier received from the server.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A user as listed by the remote collection.
///
/// ## Invariants
/// - `id` is assigned by the server; records are never built client-side with
///   a synthetic id outside tests.
/// - `email` is unique per record on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    avatar: Option<Url>,
}

impl UserRecord {
    /// Build a record from the fields the server returned.
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        avatar: Option<Url>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            avatar,
        }
    }

    /// Server identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Avatar image location, when the server supplied a valid one.
    #[must_use]
    pub const fn avatar(&self) -> Option<&Url> {
        self.avatar.as_ref()
    }

    /// `first last`, as shown in cards and confirmation prompts.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Optional banner the API attaches to single-record responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportBanner {
    /// Link target.
    pub url: String,
    /// Banner copy.
    pub text: String,
}

/// A single user plus any support banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetail {
    /// The requested record.
    pub user: UserRecord,
    /// Banner shown alongside the record.
    pub support: Option<SupportBanner>,
}

/// Result of looking up one user.
///
/// A missing record is a terminal display state rather than a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    /// The record exists.
    Found(UserDetail),
    /// The server has no record with the requested id.
    NotFound(UserId),
}

/// Validated `{ name, job }` body sent when creating or updating a user.
///
/// ## Invariants
/// - `name` is trimmed and holds [`NAME_MIN`]..=[`NAME_MAX`] characters.
/// - `job` is trimmed and holds [`JOB_MIN`]..=[`JOB_MAX`] characters.
///
/// # Examples
/// ```
/// use dashboard::domain::UserDraft;
///
/// let draft = UserDraft::new(" Morpheus ", "leader").unwrap();
/// assert_eq!(draft.name(), "Morpheus");
/// assert!(UserDraft::new("M", "leader").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    job: String,
}

impl UserDraft {
    /// Validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns a [`UserValidationError`] naming the first field that fails.
    pub fn new(name: &str, job: &str) -> Result<Self, UserValidationError> {
        let name = name.trim();
        let job = job.trim();

        let name_len = name.chars().count();
        if name_len == 0 {
            return Err(UserValidationError::EmptyName);
        }
        if name_len < NAME_MIN {
            return Err(UserValidationError::NameTooShort { min: NAME_MIN });
        }
        if name_len > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }

        let job_len = job.chars().count();
        if job_len == 0 {
            return Err(UserValidationError::EmptyJob);
        }
        if job_len < JOB_MIN {
            return Err(UserValidationError::JobTooShort { min: JOB_MIN });
        }
        if job_len > JOB_MAX {
            return Err(UserValidationError::JobTooLong { max: JOB_MAX });
        }

        Ok(Self {
            name: name.to_owned(),
            job: job.to_owned(),
        })
    }

    /// Display name to store.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Job title to store.
    #[must_use]
    pub fn job(&self) -> &str {
        &self.job
    }
}

/// Echo returned after a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    /// Identifier the server assigned, as it reported it.
    pub id: String,
    /// Stored name.
    pub name: String,
    /// Stored job title.
    pub job: String,
    /// Server timestamp, verbatim.
    pub created_at: String,
}

/// Echo returned after a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedUser {
    /// Stored name.
    pub name: String,
    /// Stored job title.
    pub job: String,
    /// Server timestamp, verbatim.
    pub updated_at: String,
}
