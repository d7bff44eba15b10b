//! Page links rendered by pagination controls.

use crate::PageNumber;

/// Number of neighbouring pages shown on each side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

/// A single entry in a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A selectable page.
    Page(PageNumber),
    /// Elided pages between two selectable entries.
    Gap,
}

/// Compute the links a pagination control shows.
///
/// The first and last pages are always present. Pages within
/// [`WINDOW_RADIUS`] of `current` fill the middle, and a [`PageLink::Gap`]
/// marks any elided run. A single page (or none) yields no links because the
/// control is hidden.
///
/// # Examples
/// ```
/// use pagination::{PageLink, PageNumber, visible_pages};
///
/// let page = |n| PageLink::Page(PageNumber::new(n).unwrap());
/// let links = visible_pages(PageNumber::new(5).unwrap(), 10);
/// assert_eq!(
///     links,
///     vec![page(1), PageLink::Gap, page(3), page(4), page(5), page(6), page(7), PageLink::Gap, page(10)],
/// );
/// ```
#[must_use]
pub fn visible_pages(current: PageNumber, total_pages: u32) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let current = current.get();
    let window_start = current.saturating_sub(WINDOW_RADIUS).max(2);
    let window_end = current
        .saturating_add(WINDOW_RADIUS)
        .min(total_pages.saturating_sub(1));

    let mut links = vec![PageLink::Page(PageNumber::FIRST)];
    if current.saturating_sub(WINDOW_RADIUS) > 2 {
        links.push(PageLink::Gap);
    }
    links.extend(
        (window_start..=window_end)
            .filter_map(|raw| PageNumber::new(raw).ok())
            .map(PageLink::Page),
    );
    if current.saturating_add(WINDOW_RADIUS) < total_pages.saturating_sub(1) {
        links.push(PageLink::Gap);
    }
    if let Ok(last) = PageNumber::new(total_pages) {
        links.push(PageLink::Page(last));
    }
    links
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn render(links: &[PageLink]) -> String {
        links
            .iter()
            .map(|link| match link {
                PageLink::Page(page) => page.to_string(),
                PageLink::Gap => "...".to_owned(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn page(raw: u32) -> PageNumber {
        PageNumber::new(raw).expect("non-zero page")
    }

    #[rstest]
    #[case(1, 0, "")]
    #[case(1, 1, "")]
    #[case(1, 2, "1 2")]
    #[case(1, 5, "1 2 3 ... 5")]
    #[case(3, 5, "1 2 3 4 5")]
    #[case(1, 10, "1 2 3 ... 10")]
    #[case(4, 10, "1 2 3 4 5 6 ... 10")]
    #[case(5, 10, "1 ... 3 4 5 6 7 ... 10")]
    #[case(10, 10, "1 ... 8 9 10")]
    fn renders_expected_window(#[case] current: u32, #[case] total: u32, #[case] expected: &str) {
        assert_eq!(render(&visible_pages(page(current), total)), expected);
    }
}
