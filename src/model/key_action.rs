//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Text entry in the search bar bypasses this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the result grid up by one card row. Default: k/↑
    ScrollUp,
    /// Scroll the result grid down by one card row. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport of card rows. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport of card rows. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump back to the first card row. Default: g/Home
    ScrollToTop,
    /// Jump to the last card row. Default: G/End
    ScrollToBottom,

    // Focus
    /// Move focus into the search bar. Default: /
    FocusSearch,
    /// Toggle focus between search bar and result grid. Default: Tab
    ToggleFocus,

    // Application
    /// Exit the application. Default: q
    Quit,
}

impl KeyAction {
    /// Whether this action moves the result grid viewport.
    pub fn is_scroll(self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
        )
    }
}
