//! One-based page numbers.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`PageNumber`] from untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageNumberError {
    /// Page numbers start at one.
    #[error("page number must be at least 1")]
    Zero,
}

/// One-based page number.
///
/// ## Invariants
/// - The wrapped value is always at least 1.
///
/// # Examples
/// ```
/// use pagination::PageNumber;
///
/// assert_eq!(PageNumber::clamped(-5), PageNumber::FIRST);
/// assert_eq!(PageNumber::clamped(3).get(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Validate and construct a page number.
    ///
    /// # Errors
    ///
    /// Returns [`PageNumberError::Zero`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, PageNumberError> {
        match NonZeroU32::new(value) {
            Some(inner) => Ok(Self(inner)),
            None => Err(PageNumberError::Zero),
        }
    }

    /// Clamp any integer into the valid page range.
    ///
    /// Values below 1 become the first page and values beyond `u32::MAX`
    /// saturate.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = u32::try_from(value.max(1)).unwrap_or(u32::MAX);
        Self::new(bounded).unwrap_or(Self::FIRST)
    }

    /// Raw one-based value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The following page, saturating at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding page, or `None` on the first page.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match NonZeroU32::new(self.0.get().saturating_sub(1)) {
            Some(inner) => Some(Self(inner)),
            None => None,
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = PageNumberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}
