//! Result grid and back-to-top badge widgets.

use crate::model::SearchResult;
use crate::state::grid_scroll::{GridGeometry, GridScroll, CARD_HEIGHT, CARD_WIDTH};
use crate::view::constants::BACK_TO_TOP_LABEL;
use crate::view::helpers::truncate_to_width;
use crate::view::styles::ViewStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Cards laid out in as many columns as fit, starting at the scroll row.
pub struct ResultGrid<'a> {
    results: &'a [SearchResult],
    scroll: GridScroll,
    styles: &'a ViewStyles,
}

impl<'a> ResultGrid<'a> {
    /// Create new ResultGrid widget.
    pub fn new(results: &'a [SearchResult], scroll: GridScroll, styles: &'a ViewStyles) -> Self {
        Self {
            results,
            scroll,
            styles,
        }
    }
}

impl Widget for ResultGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let geometry = GridGeometry::new(self.results.len(), area.width, area.height);
        let columns = geometry.columns();
        let first_row = self.scroll.first_row();
        let last_row = (first_row + geometry.visible_rows()).min(geometry.total_rows());

        for (screen_row, row) in (first_row..last_row).enumerate() {
            for column in 0..columns {
                let index = row * columns + column;
                let Some(result) = self.results.get(index) else {
                    return;
                };
                let Some(card_area) = card_rect(area, column, screen_row) else {
                    continue;
                };
                Card::new(index, result, self.styles).render(card_area, buf);
            }
        }
    }
}

/// Screen rect of the card at `column`, `screen_row`, clipped to `area`.
fn card_rect(area: Rect, column: usize, screen_row: usize) -> Option<Rect> {
    let x = area.x as usize + column * CARD_WIDTH as usize;
    let y = area.y as usize + screen_row * CARD_HEIGHT as usize;
    if x >= area.right() as usize || y >= area.bottom() as usize {
        return None;
    }
    let x = u16::try_from(x).ok()?;
    let y = u16::try_from(y).ok()?;
    Some(Rect::new(
        x,
        y,
        CARD_WIDTH.min(area.right() - x),
        CARD_HEIGHT.min(area.bottom() - y),
    ))
}

/// One result: numbered border, title, image URL.
struct Card<'a> {
    index: usize,
    result: &'a SearchResult,
    styles: &'a ViewStyles,
}

impl<'a> Card<'a> {
    fn new(index: usize, result: &'a SearchResult, styles: &'a ViewStyles) -> Self {
        Self {
            index,
            result,
            styles,
        }
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_width = usize::from(area.width.saturating_sub(2));
        let mut title = format!(" {} ", self.index + 1);
        if let Some(rating) = self.result.rating() {
            title.push_str(&format!("[{}] ", rating));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border)
            .title(title);

        let lines = vec![
            Line::from(Span::styled(
                truncate_to_width(self.result.display_title(), inner_width),
                self.styles.card_title,
            )),
            Line::from(Span::styled(
                truncate_to_width(self.result.image_url(), inner_width),
                self.styles.card_url,
            )),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// Badge drawn over the bottom-right corner of the grid.
pub struct BackToTopBadge<'a> {
    styles: &'a ViewStyles,
}

impl<'a> BackToTopBadge<'a> {
    /// Create new BackToTopBadge widget.
    pub fn new(styles: &'a ViewStyles) -> Self {
        Self { styles }
    }

    /// Where the badge sits inside `grid_area`.
    pub fn area(grid_area: Rect) -> Rect {
        let width = (BACK_TO_TOP_LABEL.width() as u16).min(grid_area.width);
        Rect::new(
            grid_area.right().saturating_sub(width),
            grid_area.bottom().saturating_sub(1),
            width,
            grid_area.height.min(1),
        )
    }
}

impl Widget for BackToTopBadge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(BACK_TO_TOP_LABEL, self.styles.badge)).render(area, buf);
    }
}
