//! Screen layout: search bar on top, result grid, status bar at the bottom.
//!
//! Area calculation is pure so the event loop can hit-test mouse clicks
//! against the same rects that were drawn.

use crate::state::{AppState, FocusPane};
use crate::view::constants::{SEARCH_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::result_grid::{BackToTopBadge, ResultGrid};
use crate::view::search_bar::SearchBar;
use crate::view::status_line::StatusLine;
use crate::view::styles::ViewStyles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Rects of the three screen regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Search bar.
    pub search: Rect,
    /// Result grid.
    pub grid: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the frame into search bar, grid and status bar.
pub fn calculate_areas(frame_area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame_area);

    ScreenAreas {
        search: chunks[0],
        grid: chunks[1],
        status: chunks[2],
    }
}

/// Render the whole screen for `state`.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &ViewStyles) {
    let areas = calculate_areas(frame.area());

    frame.render_widget(
        SearchBar::new(&state.input, state.focus == FocusPane::Search, styles),
        areas.search,
    );

    frame.render_widget(
        ResultGrid::new(state.session.results(), state.scroll, styles),
        areas.grid,
    );

    if state.scroll.shows_back_to_top() {
        frame.render_widget(
            BackToTopBadge::new(styles),
            BackToTopBadge::area(areas.grid),
        );
    }

    frame.render_widget(
        StatusLine::new(&state.session, state.focus, styles),
        areas.status,
    );
}
