//! Page slicing, page counts, and the page-button window for list controls.

use std::fmt;

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_MAX_VISIBLE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl PaginationState {
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }
}

/// One entry in a page-button list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Gap,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{page}"),
            PageItem::Gap => f.write_str("…"),
        }
    }
}

/// Return the `page`-th (one-based) slice of `items`.
///
/// Pages outside the valid range, including page 0, yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total_items`. Zero items means zero pages.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Compact page-button list: first page, a window around `current_page`,
/// last page, and gaps where pages are skipped.
pub fn page_numbers(current_page: usize, total_pages: usize, max_visible: usize) -> Vec<PageItem> {
    if total_pages <= max_visible {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut pages = vec![PageItem::Page(1)];

    let start = current_page.saturating_sub(1).max(2);
    let end = current_page.saturating_add(1).min(total_pages - 1);

    if start > 2 {
        pages.push(PageItem::Gap);
    }

    pages.extend((start..=end).map(PageItem::Page));

    if end < total_pages - 1 {
        pages.push(PageItem::Gap);
    }

    if total_pages > 1 {
        pages.push(PageItem::Page(total_pages));
    }

    pages
}

/// Render a page-button list as a single line, marking the current page.
pub fn render_controls(items: &[PageItem], current_page: usize) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == current_page => format!("[{page}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
