//! Listing pagination
//!
//! One shared routine backs every paginated listing in the application
//! (personal tasks, the workshop catalog, and the team roster). Out-of-range
//! page requests are silently clamped into the valid range rather than
//! producing an error.

use serde::Serialize;

/// A resolved page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page: i64,
    pub pages: i64,
    pub per_page: i64,
    pub total: i64,
    pub offset: i64,
    pub has_prev: bool,
    pub has_next: bool,
    /// 1..=pages, for numbered pager links
    pub page_numbers: Vec<i64>,
}

/// Resolve a requested page number against a total row count.
///
/// `pages` is always at least 1, and the returned `page` always satisfies
/// `1 <= page <= pages`. `per_page` must be positive.
pub fn paginate(requested_page: i64, total: i64, per_page: i64) -> Page {
    debug_assert!(per_page >= 1, "per_page must be positive");
    let per_page = per_page.max(1);
    let total = total.max(0);

    let pages = ((total + per_page - 1) / per_page).max(1);
    let page = requested_page.clamp(1, pages);
    let offset = (page - 1) * per_page;

    Page {
        page,
        pages,
        per_page,
        total,
        offset,
        has_prev: page > 1,
        has_next: page < pages,
        page_numbers: (1..=pages).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_requests_are_clamped() {
        let page = paginate(999, 10, 4);
        assert_eq!(page.page, 3);
        assert_eq!(page.pages, 3);
        assert_eq!(page.offset, 8);
        assert!(page.has_prev);
        assert!(!page.has_next);

        let page = paginate(0, 10, 4);
        assert_eq!(page.page, 1);
        assert_eq!(page.offset, 0);

        let page = paginate(-5, 10, 4);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_empty_listing_still_has_one_page() {
        let page = paginate(1, 0, 3);
        assert_eq!(page.pages, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.offset, 0);
        assert!(!page.has_prev);
        assert!(!page.has_next);
        assert_eq!(page.page_numbers, vec![1]);
    }

    #[test]
    fn test_exact_multiple_of_per_page() {
        let page = paginate(2, 8, 4);
        assert_eq!(page.pages, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.offset, 4);
        assert!(page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn test_bounds_hold_for_a_sweep_of_inputs() {
        for total in 0..50 {
            for per_page in 1..7 {
                for requested in -3..60 {
                    let page = paginate(requested, total, per_page);
                    assert!(page.pages >= 1);
                    assert!(page.page >= 1 && page.page <= page.pages);
                    assert!(page.offset < page.pages * page.per_page);
                }
            }
        }
    }
}
