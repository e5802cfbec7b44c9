//! "Load more" paging of a filtered listing.

use serde::Serialize;

/// Products revealed per "load more" step.
pub const PAGE_SIZE: usize = 16;

/// The visible prefix of a result list.
///
/// Page `n` (1-based) shows the first `n * page_size` items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Visible items.
    pub items: Vec<T>,
    /// Size of the full result list.
    pub total: usize,
    /// Whether "load more" has anything left to show.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Cut the visible prefix for `page`. Page 0 is treated as page 1.
    pub fn paginate(items: Vec<T>, page: usize, page_size: usize) -> Self {
        let total = items.len();
        let visible = page.max(1).saturating_mul(page_size.max(1));
        let mut items = items;
        items.truncate(visible);
        Self {
            has_more: items.len() < total,
            items,
            total,
        }
    }

    /// Number of visible items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
