//! Page position, display counters, and the windowed page-link list

/// Current page, page size, and total record count for one table view.
///
/// Pages are 1-based. `total` comes from the API envelope for the artworks
/// view and from the filtered record count for the customers view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl PageState {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total: 0,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.total.div_ceil(self.limit as u64) as u32
    }

    /// 1-based index of the first displayed row, 0 when the view is empty
    pub fn first_row(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            (self.page as u64 - 1) * self.limit as u64 + 1
        }
    }

    /// 1-based index of the last displayed row
    pub fn last_row(&self) -> u64 {
        (self.page as u64 * self.limit as u64).min(self.total)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Clamp a requested page into the valid range
    pub fn clamped(&self, page: u32) -> u32 {
        page.clamp(1, self.page_count().max(1))
    }

    /// Record count changed (new fetch or filter); keep the page in range
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        self.page = self.clamped(self.page);
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
        self.page = self.clamped(self.page);
    }

    /// Page links for the paginator: `Some(n)` is a clickable page number,
    /// `None` an ellipsis gap. Always shows the edges and a window around the
    /// current page.
    pub fn page_links(&self) -> Vec<Option<u32>> {
        page_window(self.page_count(), self.page, 1, 2, 2, 1)
    }
}

fn page_window(
    total_pages: u32,
    current_page: u32,
    left_edge: u32,
    left_current: u32,
    right_current: u32,
    right_edge: u32,
) -> Vec<Option<u32>> {
    let last_page = total_pages;
    if last_page == 0 {
        return Vec::new();
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_match_current_page_report() {
        // "Showing 1 to 12 of 100 entries"
        let mut state = PageState::new(12);
        state.set_total(100);
        assert_eq!(state.first_row(), 1);
        assert_eq!(state.last_row(), 12);
        assert_eq!(state.page_count(), 9);

        state.page = 9;
        assert_eq!(state.first_row(), 97);
        assert_eq!(state.last_row(), 100);
        assert!(!state.can_next());
        assert!(state.can_prev());
    }

    #[test]
    fn empty_view_shows_zero_counters() {
        let state = PageState::new(12);
        assert_eq!(state.first_row(), 0);
        assert_eq!(state.last_row(), 0);
        assert_eq!(state.page_count(), 0);
        assert!(state.page_links().is_empty());
        assert!(!state.can_prev());
        assert!(!state.can_next());
    }

    #[test]
    fn shrinking_total_pulls_page_back_into_range() {
        let mut state = PageState::new(12);
        state.set_total(100);
        state.page = 9;
        state.set_total(20);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn limit_change_keeps_page_valid() {
        let mut state = PageState::new(12);
        state.set_total(100);
        state.page = 9;
        state.set_limit(50);
        assert_eq!(state.page_count(), 2);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn small_page_count_has_no_gaps() {
        let links = page_window(5, 3, 1, 2, 2, 1);
        assert_eq!(
            links,
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
    }

    #[test]
    fn middle_of_large_range_gaps_both_sides() {
        let links = page_window(50, 25, 1, 2, 2, 1);
        assert_eq!(
            links,
            vec![
                Some(1),
                None,
                Some(23),
                Some(24),
                Some(25),
                Some(26),
                Some(27),
                None,
                Some(50)
            ]
        );
    }

    #[test]
    fn first_page_of_large_range_gaps_right_only() {
        let links = page_window(50, 1, 1, 2, 2, 1);
        assert_eq!(links, vec![Some(1), Some(2), Some(3), None, Some(50)]);
    }

    #[test]
    fn last_page_of_large_range_gaps_left_only() {
        let links = page_window(50, 50, 1, 2, 2, 1);
        assert_eq!(links, vec![Some(1), None, Some(48), Some(49), Some(50)]);
    }
}
