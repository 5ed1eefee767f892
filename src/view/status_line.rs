//! Status line widget.
//!
//! Left side: the session's status message, a "Searching…" marker while a
//! request is in flight, or a key hint. Right side: the result counter.

use crate::model::FetchKind;
use crate::state::{format_count, FocusPane, SearchSession};
use crate::view::constants::{RESULTS_HINT, SEARCH_HINT};
use crate::view::styles::ViewStyles;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// One-line status bar.
pub struct StatusLine<'a> {
    session: &'a SearchSession,
    focus: FocusPane,
    styles: &'a ViewStyles,
}

impl<'a> StatusLine<'a> {
    /// Create new StatusLine widget.
    pub fn new(session: &'a SearchSession, focus: FocusPane, styles: &'a ViewStyles) -> Self {
        Self {
            session,
            focus,
            styles,
        }
    }

    /// Text and style for the left side.
    pub fn message(&self) -> (String, Style) {
        if let Some(pending) = self.session.pending() {
            let term = pending.query().term();
            let text = match pending.kind() {
                FetchKind::NewSearch => format!("Searching for \"{}\"…", term),
                FetchKind::Continuation => format!("Searching for more \"{}\"…", term),
            };
            return (text, self.styles.busy);
        }

        if let Some(message) = self.session.status_message() {
            return (message, self.styles.for_status(self.session.status()));
        }

        let hint = match self.focus {
            FocusPane::Search => SEARCH_HINT,
            FocusPane::Results => RESULTS_HINT,
        };
        (hint.to_string(), self.styles.hint)
    }

    /// "{shown} of {total}", once a search has reported a total.
    pub fn counter(&self) -> Option<String> {
        let total = self.session.total_count();
        if total == 0 {
            return None;
        }
        Some(format!(
            "{} of {}",
            format_count(self.session.results().len() as u64),
            format_count(total)
        ))
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (message, message_style) = self.message();
        let counter = self.counter();
        let counter_width = counter
            .as_deref()
            .map(|c| c.width() as u16 + 1)
            .unwrap_or(0);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(counter_width)])
            .split(area);

        Paragraph::new(Span::styled(message, message_style)).render(chunks[0], buf);

        if let Some(counter) = counter {
            Paragraph::new(Span::styled(counter, self.styles.hint))
                .alignment(ratatui::layout::Alignment::Right)
                .render(chunks[1], buf);
        }
    }
}
