//! Result grid geometry and scroll position (pure).
//!
//! The grid scrolls by whole card rows. The view reports the area it drew
//! into; everything here is arithmetic on that area and the result count.

use crate::model::KeyAction;

/// Width of one result card in columns, borders included.
pub const CARD_WIDTH: u16 = 36;

/// Height of one result card in lines: border, title, URL, border.
pub const CARD_HEIGHT: u16 = 4;

/// Card rows scrolled past before the back-to-top badge appears.
pub const BACK_TO_TOP_THRESHOLD_ROWS: usize = 3;

// ===== GridGeometry =====

/// How a number of results lays out in a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    columns: usize,
    total_rows: usize,
    visible_rows: usize,
}

impl GridGeometry {
    /// Lay out `item_count` cards in a `width` x `height` viewport.
    ///
    /// Always at least one column and one visible row, so degenerate
    /// terminal sizes never divide by zero.
    pub fn new(item_count: usize, width: u16, height: u16) -> Self {
        let columns = usize::from((width / CARD_WIDTH).max(1));
        let visible_rows = usize::from((height / CARD_HEIGHT).max(1));
        let total_rows = item_count.div_ceil(columns);
        Self {
            columns,
            total_rows,
            visible_rows,
        }
    }

    /// Cards per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Rows needed for every card.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Rows that fit in the viewport.
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Largest valid first-visible row.
    pub fn max_first_row(&self) -> usize {
        self.total_rows.saturating_sub(self.visible_rows)
    }
}

// ===== GridScroll =====

/// First visible card row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridScroll {
    first_row: usize,
}

impl GridScroll {
    /// Index of the first visible card row.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Scroll down by `rows`, stopping at the last page.
    pub fn scroll_down(&mut self, rows: usize, geometry: &GridGeometry) {
        self.first_row = (self.first_row + rows).min(geometry.max_first_row());
    }

    /// Scroll up by `rows`, stopping at the top.
    pub fn scroll_up(&mut self, rows: usize) {
        self.first_row = self.first_row.saturating_sub(rows);
    }

    /// Jump to the first row.
    pub fn to_top(&mut self) {
        self.first_row = 0;
    }

    /// Jump so the last row is visible.
    pub fn to_bottom(&mut self, geometry: &GridGeometry) {
        self.first_row = geometry.max_first_row();
    }

    /// Pull the position back in range after the result set shrank or the
    /// viewport grew.
    pub fn clamp(&mut self, geometry: &GridGeometry) {
        self.first_row = self.first_row.min(geometry.max_first_row());
    }

    /// Whether the last card row is inside the viewport.
    ///
    /// This is the near-bottom condition that triggers loading the next
    /// page. An empty grid counts as scrolled to the bottom.
    pub fn is_at_bottom(&self, geometry: &GridGeometry) -> bool {
        self.first_row + geometry.visible_rows() >= geometry.total_rows()
    }

    /// Whether the back-to-top badge should be shown.
    pub fn shows_back_to_top(&self) -> bool {
        self.first_row > BACK_TO_TOP_THRESHOLD_ROWS
    }
}

/// Apply a scroll action. Non-scroll actions are ignored.
pub fn handle_scroll_action(scroll: &mut GridScroll, action: KeyAction, geometry: &GridGeometry) {
    let page = geometry.visible_rows().max(1);
    match action {
        KeyAction::ScrollDown => scroll.scroll_down(1, geometry),
        KeyAction::ScrollUp => scroll.scroll_up(1),
        KeyAction::PageDown => scroll.scroll_down(page, geometry),
        KeyAction::PageUp => scroll.scroll_up(page),
        KeyAction::ScrollToTop => scroll.to_top(),
        KeyAction::ScrollToBottom => scroll.to_bottom(geometry),
        KeyAction::FocusSearch | KeyAction::ToggleFocus | KeyAction::Quit => {}
    }
}
