//! Create, update, and delete, followed by list invalidation.
//!
//! A successful mutation never patches cached pages locally; it invalidates
//! the list so the next read goes back to the server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{info, warn};

use super::ports::{ListInvalidation, UsersApi};
use super::{ApiFailure, CreatedUser, UpdatedUser, UserDraft, UserId};

/// The three mutation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// `POST /users`.
    Create,
    /// `PUT /users/{id}`.
    Update,
    /// `DELETE /users/{id}`.
    Delete,
}

impl MutationKind {
    const fn slot(self) -> usize {
        match self {
            Self::Create => 0,
            Self::Update => 1,
            Self::Delete => 2,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Decrements its counter when the call finishes, however it finishes.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs mutations against the users API and invalidates the list on success.
///
/// Mutations are independent: nothing serialises them, and each kind keeps a
/// count of in-flight calls so overlapping calls stay pending until the last
/// one settles.
pub struct MutationCoordinator<A, I> {
    api: Arc<A>,
    list: Arc<I>,
    pending: [AtomicUsize; 3],
}

impl<A, I> MutationCoordinator<A, I> {
    /// Create a coordinator over `api` that invalidates `list`.
    pub fn new(api: Arc<A>, list: Arc<I>) -> Self {
        Self {
            api,
            list,
            pending: [AtomicUsize::new(0), AtomicUsize::new(0), AtomicUsize::new(0)],
        }
    }

    /// Whether any call of `kind` is in flight.
    pub fn is_pending(&self, kind: MutationKind) -> bool {
        self.pending[kind.slot()].load(Ordering::SeqCst) > 0
    }

    fn track(&self, kind: MutationKind) -> PendingGuard<'_> {
        PendingGuard::enter(&self.pending[kind.slot()])
    }
}

impl<A, I> MutationCoordinator<A, I>
where
    A: UsersApi,
    I: ListInvalidation,
{
    /// Create a user.
    ///
    /// # Errors
    ///
    /// Passes the API failure through unchanged.
    pub async fn create(&self, draft: &UserDraft) -> Result<CreatedUser, ApiFailure> {
        let _pending = self.track(MutationKind::Create);
        let created = self
            .api
            .create_user(draft)
            .await
            .inspect_err(|failure| log_failure(MutationKind::Create, failure))?;
        info!(id = %created.id, "user created");
        self.list.invalidate();
        Ok(created)
    }

    /// Replace a user's name and job.
    ///
    /// # Errors
    ///
    /// Passes the API failure through unchanged.
    pub async fn update(&self, id: UserId, draft: &UserDraft) -> Result<UpdatedUser, ApiFailure> {
        let _pending = self.track(MutationKind::Update);
        let updated = self
            .api
            .update_user(id, draft)
            .await
            .inspect_err(|failure| log_failure(MutationKind::Update, failure))?;
        info!(%id, "user updated");
        self.list.invalidate();
        Ok(updated)
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Passes the API failure through unchanged.
    pub async fn delete(&self, id: UserId) -> Result<(), ApiFailure> {
        let _pending = self.track(MutationKind::Delete);
        self.api
            .delete_user(id)
            .await
            .inspect_err(|failure| log_failure(MutationKind::Delete, failure))?;
        info!(%id, "user deleted");
        self.list.invalidate();
        Ok(())
    }
}

fn log_failure(kind: MutationKind, failure: &ApiFailure) {
    warn!(
        mutation = kind.as_str(),
        status = ?failure.status(),
        error = %failure,
        "user mutation failed"
    );
}
