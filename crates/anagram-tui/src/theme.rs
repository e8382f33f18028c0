//! Visual constants.
//!
//! Passed to the renderer by reference; nothing here changes after startup.

use ratatui::style::Color;

/// Width of the whole view, borders included.
pub const VIEW_WIDTH: u16 = 56;

/// Colors and dimensions used by [`crate::ui::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// View width in columns.
    pub width: u16,
    /// Background of the header and word box.
    pub banner_bg: Color,
    /// Foreground of the header and word box.
    pub banner_fg: Color,
    /// Chat box border.
    pub border: Color,
    /// Error line.
    pub error: Color,
    /// Hotkey hints and the input placeholder.
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            width: VIEW_WIDTH,
            banner_bg: Color::Indexed(26),
            banner_fg: Color::Indexed(255),
            border: Color::Indexed(68),
            error: Color::Indexed(9),
            muted: Color::Indexed(8),
        }
    }
}
