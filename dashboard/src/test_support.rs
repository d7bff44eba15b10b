//! In-memory users API for integration tests.
//!
//! Mirrors the public reqres service closely enough for behaviour tests:
//! pages are sliced from a fixed collection, creates and updates echo their
//! input, and deletes remove the record so a reload can observe them. Every
//! list request is counted per page, and a page can be held until the test
//! releases it.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pagination::PageNumber;
use serde_json::json;
use tokio::sync::oneshot;

use crate::domain::ports::UsersApi;
use crate::domain::{
    ApiFailure, CreatedUser, UpdatedUser, UserDetail, UserDraft, UserId, UserRecord, UsersPage,
};

/// Page size reqres uses.
pub const PER_PAGE: u32 = 6;

/// Timestamp echoed by mutations.
pub const FIXED_TIMESTAMP: &str = "2026-01-01T00:00:00.000Z";

#[derive(Default)]
struct Collection {
    users: Vec<UserRecord>,
    list_requests: HashMap<u32, usize>,
    holds: HashMap<u32, VecDeque<oneshot::Receiver<()>>>,
    failures: VecDeque<ApiFailure>,
    next_id: u64,
}

/// Keeps one list response for a page waiting until released.
pub struct PageHold(oneshot::Sender<()>);

impl PageHold {
    /// Let the held response complete.
    pub fn release(self) {
        // The request may already have been dropped; nothing to release then.
        let _ = self.0.send(());
    }
}

/// Users API backed by an in-process collection.
#[derive(Default)]
pub struct InMemoryUsersApi {
    inner: Mutex<Collection>,
}

impl InMemoryUsersApi {
    /// Collection seeded with `users`, in server order.
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let next_id = users
            .iter()
            .map(|user| user.id().get())
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self {
            inner: Mutex::new(Collection {
                users,
                next_id,
                ..Collection::default()
            }),
        }
    }

    /// Twelve users shaped like the reqres sample data.
    pub fn sample() -> Self {
        let names = [
            ("George", "Bluth"),
            ("Janet", "Weaver"),
            ("Emma", "Wong"),
            ("Eve", "Holt"),
            ("Charles", "Morris"),
            ("Tracey", "Ramos"),
            ("Michael", "Lawson"),
            ("Lindsay", "Ferguson"),
            ("Tobias", "Funke"),
            ("Byron", "Fields"),
            ("George", "Edwards"),
            ("Rachel", "Howell"),
        ];
        let users = names
            .iter()
            .zip(1_u64..)
            .map(|((first, last), id)| {
                let email = format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase());
                UserRecord::new(UserId::new(id), *first, *last, email, None)
            })
            .collect();
        Self::with_users(users)
    }

    fn lock(&self) -> MutexGuard<'_, Collection> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of list requests received for `page`.
    pub fn list_requests(&self, page: u32) -> usize {
        self.lock().list_requests.get(&page).copied().unwrap_or(0)
    }

    /// Number of list requests received for any page.
    pub fn total_list_requests(&self) -> usize {
        self.lock().list_requests.values().sum()
    }

    /// Hold the next list response for `page` until the returned guard is
    /// released.
    pub fn hold_page(&self, page: u32) -> PageHold {
        let (tx, rx) = oneshot::channel();
        self.lock().holds.entry(page).or_default().push_back(rx);
        PageHold(tx)
    }

    /// Fail the next list request with `failure`.
    pub fn fail_next_list(&self, failure: ApiFailure) {
        self.lock().failures.push_back(failure);
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().users.is_empty()
    }

    fn slice(&self, page: PageNumber) -> UsersPage {
        let state = self.lock();
        let total = state.users.len();
        let per_page = PER_PAGE as usize;
        let total_pages = u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX);
        let start = (page.get() as usize - 1).saturating_mul(per_page);
        let data = state
            .users
            .iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();
        UsersPage::new(data, page, PER_PAGE, total as u64, total_pages)
    }
}

fn not_found() -> ApiFailure {
    ApiFailure::server(404, Some(json!({})))
}

#[async_trait]
impl UsersApi for InMemoryUsersApi {
    async fn list_users(&self, page: PageNumber) -> Result<UsersPage, ApiFailure> {
        let (hold, failure) = {
            let mut state = self.lock();
            *state.list_requests.entry(page.get()).or_default() += 1;
            let hold = state
                .holds
                .get_mut(&page.get())
                .and_then(VecDeque::pop_front);
            (hold, state.failures.pop_front())
        };
        if let Some(hold) = hold {
            // A dropped hold releases the response as well.
            let _ = hold.await;
        }
        match failure {
            Some(failure) => Err(failure),
            None => Ok(self.slice(page)),
        }
    }

    async fn get_user(&self, id: UserId) -> Result<UserDetail, ApiFailure> {
        self.lock()
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned()
            .map(|user| UserDetail {
                user,
                support: None,
            })
            .ok_or_else(not_found)
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<CreatedUser, ApiFailure> {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id = id.saturating_add(1);
        Ok(CreatedUser {
            id: id.to_string(),
            name: draft.name().to_owned(),
            job: draft.job().to_owned(),
            created_at: FIXED_TIMESTAMP.to_owned(),
        })
    }

    async fn update_user(&self, _id: UserId, draft: &UserDraft) -> Result<UpdatedUser, ApiFailure> {
        Ok(UpdatedUser {
            name: draft.name().to_owned(),
            job: draft.job().to_owned(),
            updated_at: FIXED_TIMESTAMP.to_owned(),
        })
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiFailure> {
        self.lock().users.retain(|user| user.id() != id);
        Ok(())
    }
}
