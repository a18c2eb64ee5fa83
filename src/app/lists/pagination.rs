//! Client-side paging over an already fetched list.

use std::ops::Range;

pub(crate) const ITEMS_PER_PAGE: usize = 10;
const PAGE_WINDOW: usize = 5;

/// 1-based page cursor over `total` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pager {
    page: usize,
    per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}

impl Pager {
    pub(crate) fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub(crate) fn page(&self) -> usize {
        self.page
    }

    pub(crate) fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    pub(crate) fn has_next(&self, total: usize) -> bool {
        self.page < self.total_pages(total)
    }

    pub(crate) fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub(crate) fn next(&mut self, total: usize) -> bool {
        if self.has_next(total) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Pulls the cursor back onto the last page after the list shrank.
    pub(crate) fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.total_pages(total)).max(1);
    }

    /// Index range of the current page, empty past the end.
    pub(crate) fn range(&self, total: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.per_page).min(total);
        let end = (start + self.per_page).min(total);
        start..end
    }

    pub(crate) fn summary(&self, total: usize, noun: &str) -> String {
        let first = if total == 0 {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        };
        let last = (self.page * self.per_page).min(total);
        format!("Showing {first} to {last} of {total} {noun}")
    }

    /// Up to five page numbers centred on the current page.
    pub(crate) fn window(&self, total: usize) -> Vec<usize> {
        let pages = self.total_pages(total);
        let len = pages.min(PAGE_WINDOW);
        let first = if pages <= PAGE_WINDOW || self.page <= 3 {
            1
        } else if self.page + 2 >= pages {
            pages + 1 - PAGE_WINDOW
        } else {
            self.page - 2
        };
        (first..first + len).collect()
    }
}
