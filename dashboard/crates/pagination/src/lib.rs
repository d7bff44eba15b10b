//! Pagination primitives for the users dashboard.
//!
//! The remote collection API pages its results with a plain one-based page
//! number. This crate models the response envelope ([`Page`]), the page number
//! itself ([`PageNumber`]), and the derived views used by pagination controls
//! ([`visible_pages`], [`PageStats`]).

mod page;
mod page_number;
mod stats;
mod window;

pub use page::Page;
pub use page_number::{PageNumber, PageNumberError};
pub use stats::PageStats;
pub use window::{PageLink, WINDOW_RADIUS, visible_pages};
