//! Page-link windows for list templates.

use serde::Serialize;

use crate::repository::Page;

/// Items requested per page on every list screen.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

const EDGE_PAGES: usize = 2;
const BEFORE_CURRENT: usize = 2;
const AFTER_CURRENT: usize = 4;

/// Page numbers to render as links; `None` marks an ellipsis.
///
/// The first and last [`EDGE_PAGES`] pages are always shown together with a
/// window around the current page.
fn page_links(last_page: usize, current: usize) -> Vec<Option<usize>> {
    if last_page == 0 {
        return Vec::new();
    }

    let window_start = current.saturating_sub(BEFORE_CURRENT).max(1);
    let window_end = current.saturating_add(AFTER_CURRENT).min(last_page);

    let mut links = Vec::new();
    let mut previous = 0;
    for page in 1..=last_page {
        let is_edge = page <= EDGE_PAGES || page + EDGE_PAGES > last_page;
        let in_window = (window_start..=window_end).contains(&page);
        if !(is_edge || in_window) {
            continue;
        }
        if page > previous + 1 {
            links.push(None);
        }
        links.push(Some(page));
        previous = page;
    }
    links
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, last_page: usize, total: usize) -> Self {
        let page = current_page.max(1);
        Self {
            pages: page_links(last_page, page),
            items,
            page,
            total,
        }
    }
}

impl<T> From<Page<T>> for Paginated<T> {
    fn from(page: Page<T>) -> Self {
        let meta = page.meta;
        Self::new(page.items, meta.current_page, meta.last_page, meta.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_have_no_gaps() {
        assert_eq!(
            page_links(4, 2),
            vec![Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn long_lists_collapse_into_ellipses() {
        assert_eq!(
            page_links(30, 10),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(29),
                Some(30),
            ]
        );
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        assert_eq!(page_links(3, usize::MAX), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn empty_result_has_no_links() {
        assert!(page_links(0, 1).is_empty());
        let paginated = Paginated::<u8>::new(Vec::new(), 0, 0, 0);
        assert_eq!(paginated.page, 1);
    }
}
