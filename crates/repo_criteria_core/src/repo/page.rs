//! Length-aware pagination result.
//!
//! # Invariants
//! - `last_page >= 1`, even for an empty result.
//! - `from`/`to` are `None` exactly when `items` is empty.

use serde::Serialize;

/// Page size used when a caller asks for `0` rows per page.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// One page of records with length-aware pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Rows matching the query across all pages.
    pub total: u64,
    pub per_page: u32,
    /// 1-based.
    pub current_page: u32,
    /// Always at least 1, even for an empty result.
    pub last_page: u32,
    /// 1-based position of the first item on this page.
    pub from: Option<u64>,
    /// 1-based position of the last item on this page.
    pub to: Option<u64>,
    pub has_more_pages: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, per_page: u32, current_page: u32) -> Self {
        let last_page = if per_page == 0 {
            1
        } else {
            total.div_ceil(u64::from(per_page)).max(1)
        };
        let last_page = u32::try_from(last_page).unwrap_or(u32::MAX);

        let offset = u64::from(current_page.saturating_sub(1)) * u64::from(per_page);
        let (from, to) = if items.is_empty() {
            (None, None)
        } else {
            (Some(offset + 1), Some(offset + items.len() as u64))
        };

        Self {
            items,
            total,
            per_page,
            current_page,
            last_page,
            from,
            to,
            has_more_pages: current_page < last_page,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn metadata_for_middle_page() {
        let page = Page::new(vec!["d", "e", "f"], 10, 3, 2);
        assert_eq!(page.last_page, 4);
        assert_eq!(page.from, Some(4));
        assert_eq!(page.to, Some(6));
        assert!(page.has_more_pages);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let page: Page<u8> = Page::new(Vec::new(), 0, 10, 1);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.from, None);
        assert_eq!(page.to, None);
        assert!(!page.has_more_pages);
        assert!(page.is_empty());
    }

    #[test]
    fn partial_last_page() {
        let page = Page::new(vec![11], 11, 5, 3);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.from, Some(11));
        assert_eq!(page.to, Some(11));
        assert!(!page.has_more_pages);
    }
}
