//! Pagination stage: fixed-size pages over the sorted rows.

use std::num::NonZeroUsize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Number of pages needed for `len` items, `ceil(len / page_size)`.
pub fn page_count(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Returns page `page` (1-based) of `items`, clipped to the bounds.
///
/// Page 0 is treated as page 1; pages past the end are empty.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use docket_lib::view::page_slice;
///
/// let items: Vec<u32> = (1..=25).collect();
/// let size = NonZeroUsize::new(10).unwrap();
/// assert_eq!(page_slice(&items, 3, size), &[21, 22, 23, 24, 25]);
/// ```
pub fn page_slice<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> &[T] {
    let size = page_size.get();
    let start = page.max(1).saturating_sub(1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Pagination summary for the footer of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page, 1-based.
    pub page: usize,
    /// Rows per page.
    pub page_size: NonZeroUsize,
    /// Rows after filtering.
    pub total_items: usize,
    /// Number of pages.
    pub page_count: usize,
}

impl PageInfo {
    /// Computes the summary for `total_items` rows on `page`.
    pub fn new(page: usize, page_size: NonZeroUsize, total_items: usize) -> Self {
        Self {
            page,
            page_size,
            total_items,
            page_count: page_count(total_items, page_size),
        }
    }

    /// 1-based index of the first row shown, 0 when the page is empty.
    pub fn first_item(&self) -> usize {
        let start = (self.page.max(1) - 1) * self.page_size.get();
        if start < self.total_items { start + 1 } else { 0 }
    }

    /// 1-based index of the last row shown, 0 when the page is empty.
    pub fn last_item(&self) -> usize {
        if self.first_item() == 0 {
            return 0;
        }
        (self.page.max(1) * self.page_size.get()).min(self.total_items)
    }

    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

impl std::fmt::Display for PageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Showing {}-{} of {} (page {} of {})",
            self.first_item(),
            self.last_item(),
            self.total_items,
            self.page,
            self.page_count.max(1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, size(10)), 0);
        assert_eq!(page_count(10, size(10)), 1);
        assert_eq!(page_count(25, size(10)), 3);
    }

    #[test]
    fn test_last_page_is_partial() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(page_slice(&items, 1, size(10)).len(), 10);
        assert_eq!(page_slice(&items, 3, size(10)).len(), 5);
        assert!(page_slice(&items, 4, size(10)).is_empty());
        assert_eq!(page_slice(&items, 0, size(10)), page_slice(&items, 1, size(10)));
    }

    #[test]
    fn test_pages_concatenate_to_input() {
        let items: Vec<usize> = (0..23).collect();
        for page_size in 1..=30 {
            let page_size = size(page_size);
            let pages = page_count(items.len(), page_size);
            let joined: Vec<usize> = (1..=pages)
                .flat_map(|p| page_slice(&items, p, page_size).to_vec())
                .collect();
            assert_eq!(joined, items);
        }
    }

    #[test]
    fn test_page_info_display() {
        let info = PageInfo::new(3, size(10), 25);
        assert_eq!(info.first_item(), 21);
        assert_eq!(info.last_item(), 25);
        assert!(info.has_previous());
        assert!(!info.has_next());
        assert_eq!(info.to_string(), "Showing 21-25 of 25 (page 3 of 3)");

        let empty = PageInfo::new(1, size(10), 0);
        assert_eq!(empty.to_string(), "Showing 0-0 of 0 (page 1 of 1)");
    }

    #[test]
    fn test_page_zero_reads_as_first_page() {
        let info = PageInfo::new(0, size(10), 25);
        assert_eq!(info.first_item(), 1);
        assert_eq!(info.last_item(), 10);
    }
}
