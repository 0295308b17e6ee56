//! The result of one pipeline evaluation.

use serde::Serialize;

/// One page of records plus pagination metadata.
///
/// `items` borrow from the evaluated collection. `page` is the effective page
/// after clamping, which may differ from the requested one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    /// Records on this page, in sorted order.
    pub items: Vec<&'a T>,
    /// Records that survived search and filters, before pagination.
    pub total_items: usize,
    /// `max(1, ceil(total_items / page_size))`.
    pub total_pages: usize,
    /// Effective 1-based page number.
    pub page: usize,
    /// Page size used for slicing.
    pub page_size: usize,
}

impl<'a, T> Page<'a, T> {
    /// Slices an already searched, filtered and sorted set.
    ///
    /// `page` is clamped into `[1, total_pages]`, so a page past the end yields
    /// the last page. Callers guarantee `page_size > 0`.
    pub(crate) fn slice(mut matched: Vec<&'a T>, page: usize, page_size: usize) -> Self {
        let total_items = matched.len();
        let total_pages = page_count(total_items, page_size);
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_items);

        matched.truncate(end);
        let items = matched.split_off(start.min(end));

        Page {
            items,
            total_items,
            total_pages,
            page,
            page_size,
        }
    }

    /// Returns `true` if there are no records to show.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position of the first record on this page, or 0 when empty.
    ///
    /// Together with [`Page::last_index`] this drives "showing 11–20 of 25".
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last record on this page, or 0 when empty.
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + self.items.len()
        }
    }

    /// Clones the records of this page.
    pub fn cloned(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().map(|item| (*item).clone()).collect()
    }
}

/// Number of pages needed for `total_items`, never less than one.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}
