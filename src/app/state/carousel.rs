//! Windowed pagination of a list.
//!
//! Item 0 of every list is reserved for the banner, so a carousel shows
//! items `1 + w*p .. 1 + w*p + w` for page `p` and window size `w`.

/// Position of one carousel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: usize,
    /// Set by [`Paginator::advance`], cleared by [`Paginator::finish_transition`].
    /// While set, further advances are ignored.
    pub transitioning: bool,
}

/// Pagination rules for a given window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    window_size: usize,
}

impl Paginator {
    /// A window size of 0 is treated as 1.
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size: window_size.max(1),
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Last page index, `floor((item_count - 1) / w) - 1`.
    ///
    /// Negative or zero when the list fits in one page (or is empty).
    pub fn max_index(&self, item_count: usize) -> i64 {
        (item_count as i64 - 1).div_euclid(self.window_size as i64) - 1
    }

    /// Items shown on page `page_index`. Empty when the page is past the end.
    pub fn visible_slice<'a, T>(&self, items: &'a [T], page_index: usize) -> &'a [T] {
        let start = self
            .window_size
            .saturating_mul(page_index)
            .saturating_add(1);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.window_size).min(items.len());
        &items[start..end]
    }

    /// Moves to the next page, wrapping to the first after the last.
    ///
    /// Returns `false` and changes nothing while a transition is running.
    pub fn advance(&self, state: &mut PaginationState, item_count: usize) -> bool {
        if state.transitioning {
            return false;
        }
        state.transitioning = true;

        let max_index = self.max_index(item_count);
        state.page_index = if max_index <= 0 || state.page_index as i64 >= max_index {
            0
        } else {
            state.page_index + 1
        };
        true
    }

    /// Clears the transition gate once the slide animation is over.
    pub fn finish_transition(&self, state: &mut PaginationState) {
        state.transitioning = false;
    }
}
