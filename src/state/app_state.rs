//! Top-level UI state (pure).
//!
//! Bundles the search session with the presentation-only state the TUI
//! needs: the search bar text, which pane has focus and the grid scroll
//! position. The session is only touched through its two triggers.

use crate::model::{FetchOutcome, FetchRequest, KeyAction, PageSize};
use crate::state::grid_scroll::{handle_scroll_action, GridGeometry, GridScroll};
use crate::state::search_input::{self, SearchInputState};
use crate::state::session::{Applied, SearchSession};

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Keys edit the search bar.
    #[default]
    Search,
    /// Keys scroll the result grid.
    Results,
}

/// Complete UI state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search/pagination state machine.
    pub session: SearchSession,
    /// Search bar contents.
    pub input: SearchInputState,
    /// Focused pane.
    pub focus: FocusPane,
    /// Result grid scroll position.
    pub scroll: GridScroll,
}

impl AppState {
    /// Fresh state requesting `page_size` results per page.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            session: SearchSession::new(page_size),
            input: SearchInputState::default(),
            focus: FocusPane::default(),
            scroll: GridScroll::default(),
        }
    }

    /// Submit whatever is in the search bar.
    ///
    /// Returns the request to issue, if the session wants one. The grid
    /// returns to the top whenever a new search starts.
    pub fn submit_input(&mut self) -> Option<FetchRequest> {
        let (input, term) = search_input::submit_input(std::mem::take(&mut self.input));
        self.input = input;
        let request = self.session.submit_search(&term);
        if request.is_some() {
            self.scroll.to_top();
        }
        request
    }

    /// Apply a scroll action and fire the near-bottom trigger if the
    /// viewport now shows the last row.
    pub fn scroll_grid(&mut self, action: KeyAction, geometry: &GridGeometry) -> Option<FetchRequest> {
        handle_scroll_action(&mut self.scroll, action, geometry);
        self.near_bottom(geometry)
    }

    /// Near-bottom trigger. Only meaningful while a term is active.
    pub fn near_bottom(&mut self, geometry: &GridGeometry) -> Option<FetchRequest> {
        if !self.session.has_active_term() || !self.scroll.is_at_bottom(geometry) {
            return None;
        }
        self.session.load_more()
    }

    /// Feed a fetch outcome to the session.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        self.session.apply(outcome)
    }

    /// Toggle focus between search bar and result grid.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Search => FocusPane::Results,
            FocusPane::Results => FocusPane::Search,
        };
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PageSize::DEFAULT)
    }
}
