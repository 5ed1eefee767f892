//! Search bar text editing (pure state transitions).
//!
//! The cursor is a character index, not a byte index, so multi-byte input
//! edits cleanly. All functions are pure - testable without TUI.

/// Text typed into the search bar plus cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInputState {
    text: String,
    cursor: usize,
}

impl SearchInputState {
    /// Input pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text, untrimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Insert a character at the cursor and advance it.
pub fn handle_char_input(mut state: SearchInputState, ch: char) -> SearchInputState {
    let at = state.byte_index(state.cursor);
    state.text.insert(at, ch);
    state.cursor += 1;
    state
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut state: SearchInputState) -> SearchInputState {
    if state.cursor == 0 {
        return state;
    }
    let at = state.byte_index(state.cursor - 1);
    state.text.remove(at);
    state.cursor -= 1;
    state
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut state: SearchInputState) -> SearchInputState {
    if state.cursor >= state.text.chars().count() {
        return state;
    }
    let at = state.byte_index(state.cursor);
    state.text.remove(at);
    state
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut state: SearchInputState) -> SearchInputState {
    state.cursor = state.cursor.saturating_sub(1);
    state
}

/// Move cursor right by one position. Saturates at the text length.
pub fn handle_cursor_right(mut state: SearchInputState) -> SearchInputState {
    state.cursor = (state.cursor + 1).min(state.text.chars().count());
    state
}

/// Move cursor to the start of the text.
pub fn handle_cursor_home(mut state: SearchInputState) -> SearchInputState {
    state.cursor = 0;
    state
}

/// Move cursor to the end of the text.
pub fn handle_cursor_end(mut state: SearchInputState) -> SearchInputState {
    state.cursor = state.text.chars().count();
    state
}

/// Submit the input.
///
/// Surrounding whitespace is trimmed only now, so users can type
/// multi-word terms. The field keeps showing the trimmed text.
/// Returns the updated state and the submitted text.
pub fn submit_input(state: SearchInputState) -> (SearchInputState, String) {
    let trimmed = state.text.trim().to_string();
    (SearchInputState::with_text(trimmed.clone()), trimmed)
}
