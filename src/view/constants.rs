//! Layout dimension constants and fixed labels for TUI rendering.

use std::time::Duration;

/// Height of the search bar in lines (border + input + border).
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
///
/// Single line for the status message and the result counter.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// How long the event loop waits for input before checking for fetch
/// outcomes.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Title of the search bar.
pub const SEARCH_BAR_TITLE: &str = "Image Search";

/// Shown in the empty search bar.
pub const SEARCH_PLACEHOLDER: &str = "cars, engines, Fleetwood Mac, etc.";

/// Label of the back-to-top badge.
pub const BACK_TO_TOP_LABEL: &str = " ↑ Top ";

/// Status bar hint while the search bar has focus.
pub const SEARCH_HINT: &str = "Enter: search  Tab: results  Ctrl+C: quit";

/// Status bar hint while the result grid has focus.
pub const RESULTS_HINT: &str = "j/k: scroll  g/G: top/bottom  /: search  q: quit";
