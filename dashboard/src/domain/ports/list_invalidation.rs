//! Port through which mutations discard cached list pages.

/// Cache that can be told its contents are out of date.
#[cfg_attr(test, mockall::automock)]
pub trait ListInvalidation: Send + Sync {
    /// Discard every cached page so the next read hits the network.
    fn invalidate(&self);
}
