//! Single-record lookup with not-found as a display state.

use tracing::debug;

use super::ports::UsersApi;
use super::{ApiFailure, UserId, UserLookup};

/// Fetch one user, turning a not-found response into [`UserLookup::NotFound`].
///
/// # Errors
///
/// Any failure other than not-found is returned unchanged.
pub async fn lookup_user<A>(api: &A, id: UserId) -> Result<UserLookup, ApiFailure>
where
    A: UsersApi + ?Sized,
{
    match api.get_user(id).await {
        Ok(detail) => Ok(UserLookup::Found(detail)),
        Err(failure) if failure.is_not_found() => {
            debug!(%id, "user not found");
            Ok(UserLookup::NotFound(id))
        }
        Err(failure) => Err(failure),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockUsersApi;
    use crate::domain::{ErrorCode, UserDetail, UserRecord};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn found_records_are_wrapped() {
        let mut api = MockUsersApi::new();
        api.expect_get_user()
            .with(eq(UserId::new(2)))
            .times(1)
            .returning(|id| {
                Ok(UserDetail {
                    user: UserRecord::new(id, "Janet", "Weaver", "janet.weaver@reqres.in", None),
                    support: None,
                })
            });

        let lookup = lookup_user(&api, UserId::new(2)).await.expect("lookup succeeds");
        let UserLookup::Found(detail) = lookup else {
            panic!("expected a record, got {lookup:?}");
        };
        assert_eq!(detail.user.full_name(), "Janet Weaver");
    }

    #[tokio::test]
    async fn not_found_is_a_display_state() {
        let mut api = MockUsersApi::new();
        api.expect_get_user()
            .returning(|_| Err(ApiFailure::server(404, Some(serde_json::json!({})))));

        let lookup = lookup_user(&api, UserId::new(23)).await.expect("not an error");
        assert_eq!(lookup, UserLookup::NotFound(UserId::new(23)));
    }

    #[tokio::test]
    async fn other_failures_propagate() {
        let mut api = MockUsersApi::new();
        api.expect_get_user()
            .returning(|_| Err(ApiFailure::transport("dns failure")));

        let err = lookup_user(&api, UserId::new(2)).await.expect_err("transport fails");
        assert_eq!(err.code(), ErrorCode::Transport);
    }
}
