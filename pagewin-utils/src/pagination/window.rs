//! Page-button window calculation.
//!
//! Page numbers are split into fixed blocks of `window_size` pages. The window
//! is the block holding the current page, cut off at the last page.

/// Inputs to a page-window computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindowRequest {
    /// Total number of items being paginated.
    pub total_items: usize,
    /// Items shown per page.
    pub page_size: usize,
    /// Maximum number of page buttons shown at once.
    pub window_size: usize,
    /// Active page, 1-based. Not clamped to the page count.
    pub current_page: usize,
}

impl PageWindowRequest {
    /// Compute the window for this request.
    pub fn compute(self) -> Result<PageWindow, PageWindowError> {
        compute_page_window(self)
    }
}

/// The page buttons to render plus previous/next availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub total_pages: usize,
    /// Contiguous, increasing, never longer than the requested window size.
    pub page_numbers: Vec<usize>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageWindowError {
    #[error("invalid argument: `{field}` must be at least 1")]
    InvalidArgument { field: &'static str },
}

/// Compute which page buttons to show for a request.
///
/// Fails with [`PageWindowError::InvalidArgument`] when `page_size`,
/// `window_size` or `current_page` is zero. A `current_page` past the last
/// page is accepted and yields a partial or empty window.
pub fn compute_page_window(request: PageWindowRequest) -> Result<PageWindow, PageWindowError> {
    let PageWindowRequest {
        total_items,
        page_size,
        window_size,
        current_page,
    } = request;

    require_positive("page_size", page_size)?;
    require_positive("window_size", window_size)?;
    require_positive("current_page", current_page)?;

    let total_pages = total_items.div_ceil(page_size);
    let block_start = block_start(current_page, window_size);
    let block_end = block_start
        .saturating_add(window_size - 1)
        .min(total_pages);

    Ok(PageWindow {
        total_pages,
        page_numbers: (block_start..=block_end).collect(),
        can_go_previous: current_page > 1,
        can_go_next: current_page < total_pages,
    })
}

/// First page of the block containing `current_page`.
///
/// Callers must have rejected zero arguments. The result never exceeds `current_page`.
fn block_start(current_page: usize, window_size: usize) -> usize {
    (current_page - 1) / window_size * window_size + 1
}

fn require_positive(field: &'static str, value: usize) -> Result<(), PageWindowError> {
    if value == 0 {
        return Err(PageWindowError::InvalidArgument { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        total_items: usize,
        page_size: usize,
        window_size: usize,
        current_page: usize,
    ) -> PageWindowRequest {
        PageWindowRequest {
            total_items,
            page_size,
            window_size,
            current_page,
        }
    }

    #[test]
    fn first_block_of_many_pages() {
        let window = request(178, 10, 7, 1).compute().unwrap();

        assert_eq!(window.total_pages, 18);
        assert_eq!(window.page_numbers, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(!window.can_go_previous);
        assert!(window.can_go_next);
    }

    #[test]
    fn block_boundary_starts_new_block() {
        let window = request(178, 10, 7, 8).compute().unwrap();
        assert_eq!(window.page_numbers, vec![8, 9, 10, 11, 12, 13, 14]);

        let window = request(178, 10, 7, 7).compute().unwrap();
        assert_eq!(window.page_numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn last_block_is_cut_at_total_pages() {
        let window = request(178, 10, 7, 18).compute().unwrap();

        assert_eq!(window.page_numbers, vec![15, 16, 17, 18]);
        assert!(window.can_go_previous);
        assert!(!window.can_go_next);
    }

    #[test]
    fn no_items_gives_empty_window() {
        let window = request(0, 10, 7, 1).compute().unwrap();

        assert_eq!(window.total_pages, 0);
        assert!(window.page_numbers.is_empty());
        assert!(!window.can_go_previous);
        assert!(!window.can_go_next);
    }

    #[test]
    fn single_partial_page() {
        let window = request(5, 10, 2, 1).compute().unwrap();

        assert_eq!(window.total_pages, 1);
        assert_eq!(window.page_numbers, vec![1]);
        assert!(!window.can_go_next);
    }

    #[test]
    fn window_of_ten_follows_floor_blocks() {
        for current in 1..=10 {
            let window = request(500, 10, 10, current).compute().unwrap();
            assert_eq!(window.page_numbers, (1..=10).collect::<Vec<_>>());
        }
        for current in 11..=20 {
            let window = request(500, 10, 10, current).compute().unwrap();
            assert_eq!(window.page_numbers, (11..=20).collect::<Vec<_>>());
        }
    }

    #[test]
    fn current_page_past_the_end_is_not_clamped() {
        let window = request(178, 10, 7, 30).compute().unwrap();

        assert_eq!(window.total_pages, 18);
        assert!(window.page_numbers.is_empty());
        assert!(window.can_go_previous);
        assert!(!window.can_go_next);
    }

    #[test]
    fn current_page_past_the_end_inside_last_block() {
        let window = request(178, 10, 7, 20).compute().unwrap();

        assert_eq!(window.page_numbers, vec![15, 16, 17, 18]);
        assert!(!window.page_numbers.contains(&20));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert_eq!(
            request(10, 0, 5, 1).compute(),
            Err(PageWindowError::InvalidArgument { field: "page_size" })
        );
        assert_eq!(
            request(10, 5, 0, 1).compute(),
            Err(PageWindowError::InvalidArgument {
                field: "window_size"
            })
        );
        assert_eq!(
            request(10, 5, 5, 0).compute(),
            Err(PageWindowError::InvalidArgument {
                field: "current_page"
            })
        );
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let window = request(10, 1, usize::MAX, 3).compute().unwrap();
        assert_eq!(window.page_numbers, (1..=10).collect::<Vec<_>>());

        let window = request(usize::MAX, 1, 3, usize::MAX).compute().unwrap();
        assert_eq!(window.total_pages, usize::MAX);
        assert_eq!(
            window.page_numbers,
            vec![usize::MAX - 2, usize::MAX - 1, usize::MAX]
        );
        assert!(!window.can_go_next);
    }

    #[test]
    fn block_start_stays_within_the_current_block() {
        assert_eq!(block_start(1, 1), 1);
        assert_eq!(block_start(7, 7), 1);
        assert_eq!(block_start(8, 7), 8);
        assert_eq!(block_start(usize::MAX, usize::MAX), 1);
        for current in 1..=30 {
            let start = block_start(current, 4);
            assert!(start <= current && current < start + 4);
        }
    }

    #[test]
    fn error_message_names_the_field() {
        let err = request(1, 0, 1, 1).compute().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: `page_size` must be at least 1"
        );
    }
}
