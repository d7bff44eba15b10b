//! Port for the address bar query string that persists the view state.

/// Readable and replaceable query string of the current location.
///
/// Replacing the query is a shallow history update: it must not trigger a
/// navigation or reload.
#[cfg_attr(test, mockall::automock)]
pub trait QueryLocation: Send + Sync {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;

    /// Replace the query string in place.
    fn replace_query(&self, query: &str);
}
