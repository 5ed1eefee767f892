//! Colors for the search bar, cards and status line.

use crate::state::SearchStatus;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Colors explicitly on or off, ignoring the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ViewStyles =====

/// Styles used across the view.
///
/// With colors disabled every style falls back to modifiers only, so
/// focus and the badge stay visible on monochrome terminals.
#[derive(Debug, Clone, Copy)]
pub struct ViewStyles {
    /// Border of the focused pane.
    pub focused_border: Style,
    /// Border of an unfocused pane or card.
    pub border: Style,
    /// Placeholder text in the empty search bar.
    pub placeholder: Style,
    /// Text cursor in the search bar.
    pub cursor: Style,
    /// Card title line.
    pub card_title: Style,
    /// Card URL line.
    pub card_url: Style,
    /// Informational status messages (empty input, no results).
    pub notice: Style,
    /// Failure status messages.
    pub error: Style,
    /// "Searching…" marker.
    pub busy: Style,
    /// Key hints and the result counter.
    pub hint: Style,
    /// Back-to-top badge.
    pub badge: Style,
}

impl ViewStyles {
    /// Styles for `config`.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                focused_border: Style::default().fg(Color::Cyan),
                border: Style::default().fg(Color::DarkGray),
                placeholder: Style::default().fg(Color::DarkGray),
                cursor: Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
                card_title: Style::default().add_modifier(Modifier::BOLD),
                card_url: Style::default().fg(Color::Blue),
                notice: Style::default().fg(Color::Yellow),
                error: Style::default().fg(Color::Red),
                busy: Style::default().fg(Color::Green),
                hint: Style::default().fg(Color::DarkGray),
                badge: Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                border: Style::default(),
                placeholder: Style::default().add_modifier(Modifier::DIM),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                card_title: Style::default().add_modifier(Modifier::BOLD),
                card_url: Style::default(),
                notice: Style::default(),
                error: Style::default(),
                busy: Style::default(),
                hint: Style::default(),
                badge: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    /// Style for the message of `status`.
    pub fn for_status(&self, status: &SearchStatus) -> Style {
        match status {
            SearchStatus::RequestFailed { .. } => self.error,
            SearchStatus::None => self.hint,
            SearchStatus::EmptyInput | SearchStatus::NoResults | SearchStatus::NoMoreResults => {
                self.notice
            }
        }
    }
}

impl Default for ViewStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
