//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod helpers;
pub mod layout;
mod result_grid;
mod search_bar;
mod status_line;
mod styles;

pub use helpers::truncate_to_width;
pub use layout::{calculate_areas, render_layout, ScreenAreas};
pub use result_grid::{BackToTopBadge, ResultGrid};
pub use search_bar::SearchBar;
pub use status_line::StatusLine;
pub use styles::{ColorConfig, ViewStyles};

use crate::client::Fetcher;
use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, FetchOutcome, FetchRequest, KeyAction, PageSize};
use crate::state::{search_input, AppState, Applied, FocusPane, GridGeometry, SearchInputState};
use constants::TICK_INTERVAL;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Startup options for the TUI.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Term to search for immediately, as if typed and submitted.
    pub initial_term: Option<String>,
    /// Whether to use colors.
    pub colors: ColorConfig,
    /// Results requested per page.
    pub page_size: PageSize,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            initial_term: None,
            colors: ColorConfig::from_env_and_args(false),
            page_size: PageSize::DEFAULT,
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend. Owns the
/// fetcher, so the background worker stops when the app is dropped.
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    fetcher: Fetcher,
    key_bindings: KeyBindings,
    styles: ViewStyles,
    /// Last rendered areas (for mouse hit-testing and grid geometry)
    last_areas: Option<ScreenAreas>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(fetcher: Fetcher, options: TuiOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, fetcher, options))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Fetch outcomes are collected
    /// on every pass; the screen is redrawn after input or when an outcome
    /// changed the state.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let mut dirty = false;

            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            info!("Quit requested");
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            if self.poll_fetcher() {
                dirty = true;
            }

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    fn with_terminal(terminal: Terminal<B>, fetcher: Fetcher, options: TuiOptions) -> Self {
        let mut app = Self {
            terminal,
            app_state: AppState::new(options.page_size),
            fetcher,
            key_bindings: KeyBindings::default(),
            styles: ViewStyles::with_color_config(options.colors),
            last_areas: None,
        };

        if let Some(term) = options.initial_term {
            app.app_state.input = SearchInputState::with_text(term);
            app.submit();
        }

        app
    }

    /// Apply every outcome the worker has delivered.
    ///
    /// Returns true if any of them changed the state.
    fn poll_fetcher(&mut self) -> bool {
        let mut changed = false;
        for outcome in self.fetcher.drain() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        match self.app_state.apply(outcome) {
            Applied::Stale => false,
            applied => {
                debug!(?applied, "Applied fetch outcome");
                let geometry = self.grid_geometry();
                self.app_state.scroll.clamp(&geometry);
                true
            }
        }
    }

    /// Hand a request to the worker. A dead worker fails the request in place.
    fn dispatch(&mut self, request: Option<FetchRequest>) {
        let Some(request) = request else {
            return;
        };
        if let Err(failed) = self.fetcher.submit(request) {
            self.apply_outcome(failed);
        }
    }

    fn submit(&mut self) {
        let request = self.app_state.submit_input();
        if request.is_some() {
            self.app_state.focus = FocusPane::Results;
        }
        self.dispatch(request);
    }

    fn scroll(&mut self, action: KeyAction) {
        let geometry = self.grid_geometry();
        let request = self.app_state.scroll_grid(action, &geometry);
        self.dispatch(request);
    }

    fn areas(&self) -> ScreenAreas {
        if let Some(areas) = self.last_areas {
            return areas;
        }
        let (width, height) = match self.terminal.size() {
            Ok(size) => (size.width, size.height),
            Err(_) => (80, 24),
        };
        calculate_areas(Rect::new(0, 0, width, height))
    }

    fn grid_geometry(&self) -> GridGeometry {
        let grid = self.areas().grid;
        GridGeometry::new(self.app_state.session.results().len(), grid.width, grid.height)
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.app_state.focus {
            FocusPane::Search => {
                self.handle_search_key(key);
                false
            }
            FocusPane::Results => self.handle_results_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc | KeyCode::Tab => self.app_state.toggle_focus(),
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                if let Some(action) = self.key_bindings.get(key).filter(|a| a.is_scroll()) {
                    self.scroll(action);
                }
            }
            _ => {
                let input = std::mem::take(&mut self.app_state.input);
                self.app_state.input = edit_input(input, key);
            }
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::FocusSearch => self.app_state.focus = FocusPane::Search,
            KeyAction::ToggleFocus => self.app_state.toggle_focus(),
            scroll_action => self.scroll(scroll_action),
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Wheel scrolls the grid. Left click focuses the clicked pane, or jumps
    /// to the top when it lands on the back-to-top badge.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        let areas = self.areas();

        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll(KeyAction::ScrollDown),
            MouseEventKind::ScrollUp => self.scroll(KeyAction::ScrollUp),
            MouseEventKind::Down(MouseButton::Left) => {
                let badge = BackToTopBadge::area(areas.grid);
                if self.app_state.scroll.shows_back_to_top() && badge.contains(position) {
                    debug!("Back-to-top badge clicked");
                    self.scroll(KeyAction::ScrollToTop);
                } else if areas.search.contains(position) {
                    self.app_state.focus = FocusPane::Search;
                } else if areas.grid.contains(position) {
                    self.app_state.focus = FocusPane::Results;
                }
            }
            _ => {}
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let areas = calculate_areas(Rect::new(0, 0, size.width, size.height));
        self.last_areas = Some(areas);

        // The viewport may have grown since the last frame
        let geometry = self.grid_geometry();
        self.app_state.scroll.clamp(&geometry);

        let state = &self.app_state;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            render_layout(frame, state, styles);
        })?;

        Ok(())
    }
}

/// Apply a text-editing key to the search bar contents.
fn edit_input(input: SearchInputState, key: KeyEvent) -> SearchInputState {
    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            search_input::handle_char_input(input, ch)
        }
        KeyCode::Backspace => search_input::handle_backspace(input),
        KeyCode::Delete => search_input::handle_delete(input),
        KeyCode::Left => search_input::handle_cursor_left(input),
        KeyCode::Right => search_input::handle_cursor_right(input),
        KeyCode::Home => search_input::handle_cursor_home(input),
        KeyCode::End => search_input::handle_cursor_end(input),
        _ => input,
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(terminal: Terminal<B>, fetcher: Fetcher, options: TuiOptions) -> Self {
        Self::with_terminal(terminal, fetcher, options)
    }

    /// Block until the pending request (if any) has been answered.
    pub(crate) fn settle(&mut self) {
        for _ in 0..50 {
            if !self.app_state.session.is_busy() {
                return;
            }
            if let Some(outcome) = self.fetcher.recv_timeout(std::time::Duration::from_millis(100))
            {
                self.apply_outcome(outcome);
            }
        }
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_tui(fetcher: Fetcher, options: TuiOptions) -> Result<(), TuiError> {
    let mut app = TuiApp::new(fetcher, options)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_app_tests.rs"]
mod tests;
