//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod grid_scroll;
pub mod search_input;
pub mod session;

// Re-export for convenience
pub use app_state::{AppState, FocusPane};
pub use grid_scroll::{handle_scroll_action, GridGeometry, GridScroll};
pub use search_input::SearchInputState;
pub use session::{format_count, Applied, SearchSession, SearchStatus};
