//! Pure pagination math for list views.

use std::ops::Range;

/// Compute the number of pages for a paginated list.
///
/// A zero `per_page` is treated as one item per page.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Clamp a requested page into a valid range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Resolve a modal-entered page using the modal's total-pages hint.
///
/// The hint can go stale if the data changed after the modal opened, so the
/// target is bounded by both the current total and the hint seen by the user.
pub fn resolve_modal_target_page(
    entered_page: usize,
    current_total_pages: usize,
    hinted_total_pages: usize,
) -> usize {
    let max_allowed_page = current_total_pages.min(hinted_total_pages.max(1));
    clamp_page(entered_page, max_allowed_page)
}

/// Index range of the items shown on `page`.
///
/// Pages past the end yield an empty range at `total_items`.
pub fn page_item_range(total_items: usize, per_page: usize, page: usize) -> Range<usize> {
    let per_page = per_page.max(1);
    let start = page
        .saturating_sub(1)
        .saturating_mul(per_page)
        .min(total_items);
    let end = start.saturating_add(per_page).min(total_items);
    start..end
}

/// Parse a one-based page argument.
///
/// A missing argument means page 1; anything below 1 or non-numeric is `None`.
pub fn parse_one_based_page(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value.trim().parse::<usize>().ok().filter(|page| *page >= 1),
        None => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn clamp_page_handles_empty_lists() {
        assert_eq!(clamp_page(0, 0), 1);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
    }

    #[test]
    fn modal_target_respects_stale_hint() {
        assert_eq!(resolve_modal_target_page(9, 10, 4), 4);
        assert_eq!(resolve_modal_target_page(9, 3, 10), 3);
        assert_eq!(resolve_modal_target_page(2, 3, 0), 1);
    }

    #[test]
    fn item_range_for_last_and_missing_pages() {
        assert_eq!(page_item_range(24, 5, 1), 0..5);
        assert_eq!(page_item_range(24, 5, 5), 20..24);
        assert_eq!(page_item_range(24, 5, 9), 24..24);
        assert_eq!(page_item_range(24, 5, usize::MAX), 24..24);
    }

    #[test]
    fn one_based_page_parsing() {
        assert_eq!(parse_one_based_page(None), Some(1));
        assert_eq!(parse_one_based_page(Some(" 3 ")), Some(3));
        assert_eq!(parse_one_based_page(Some("0")), None);
        assert_eq!(parse_one_based_page(Some("two")), None);
    }
}
