//! Summary figures derived from a page envelope.

use crate::Page;

/// Overview of where a page sits in the full collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStats {
    /// Records across every page.
    pub total: u64,
    /// Records on the current page.
    pub on_page: usize,
    /// Pages after the current one.
    pub remaining_pages: u32,
    /// Share of pages viewed so far, as a percentage in `0.0..=100.0`.
    pub progress_percent: f64,
}

impl PageStats {
    /// Derive statistics from a page.
    ///
    /// A collection that reports zero pages yields zero progress.
    #[must_use]
    pub fn from_page<T>(page: &Page<T>) -> Self {
        let current = page.page().get();
        let total_pages = page.total_pages();
        Self {
            total: page.total(),
            on_page: page.data().len(),
            remaining_pages: total_pages.saturating_sub(current),
            progress_percent: progress_percent(current, total_pages),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "progress is a display ratio, not an accounting value"
)]
fn progress_percent(current: u32, total_pages: u32) -> f64 {
    if total_pages == 0 {
        return 0.0;
    }
    (f64::from(current.min(total_pages)) / f64::from(total_pages)) * 100.0
}
