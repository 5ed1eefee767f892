//! Search bar widget.

use crate::state::SearchInputState;
use crate::view::constants::{SEARCH_BAR_TITLE, SEARCH_PLACEHOLDER};
use crate::view::styles::ViewStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered single-line input titled "Image Search".
///
/// Shows the placeholder while empty. The cursor is drawn only when the
/// bar has focus.
pub struct SearchBar<'a> {
    input: &'a SearchInputState,
    focused: bool,
    styles: &'a ViewStyles,
}

impl<'a> SearchBar<'a> {
    /// Create new SearchBar widget.
    pub fn new(input: &'a SearchInputState, focused: bool, styles: &'a ViewStyles) -> Self {
        Self {
            input,
            focused,
            styles,
        }
    }

    fn content(&self) -> Line<'a> {
        let text = self.input.text();

        if text.is_empty() {
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled(" ", self.styles.cursor));
            }
            spans.push(Span::styled(SEARCH_PLACEHOLDER, self.styles.placeholder));
            return Line::from(spans);
        }

        if !self.focused {
            return Line::from(text.to_string());
        }

        let cursor = self.input.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        let under_cursor = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let after: String = rest.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(under_cursor, self.styles.cursor),
            Span::raw(after),
        ])
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.styles.focused_border
        } else {
            self.styles.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", SEARCH_BAR_TITLE));

        Paragraph::new(self.content()).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::styles::ColorConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(input: &SearchInputState, focused: bool) -> Buffer {
        let styles = ViewStyles::with_color_config(ColorConfig::fixed(false));
        let mut terminal = Terminal::new(TestBackend::new(50, 3)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(SearchBar::new(input, focused, &styles), frame.area());
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn title_is_image_search() {
        let buffer = render(&SearchInputState::default(), false);
        assert!(row(&buffer, 0).contains("Image Search"));
    }

    #[test]
    fn empty_bar_shows_placeholder() {
        let buffer = render(&SearchInputState::default(), false);
        assert!(row(&buffer, 1).contains("cars, engines, Fleetwood Mac, etc."));
    }

    #[test]
    fn typed_text_replaces_placeholder() {
        let buffer = render(&SearchInputState::with_text("cars"), true);
        let line = row(&buffer, 1);
        assert!(line.contains("cars"));
        assert!(!line.contains("Fleetwood"));
    }
}
