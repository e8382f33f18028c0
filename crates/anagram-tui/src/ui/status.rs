//! Status lines
//!
//! Displays the current error and the hotkey hints.

use anagram_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

/// Render the error line. Draws nothing without an error.
pub fn render_error(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let Some(error) = app.last_error() else {
        return;
    };

    let paragraph = Paragraph::new(error.to_string()).style(Style::default().fg(theme.error));

    frame.render_widget(paragraph, area);
}

/// Render the hotkey hints.
pub fn render_hotkeys(frame: &mut Frame, theme: &Theme, area: Rect) {
    let key = Style::default().fg(theme.muted).add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(theme.muted);

    let line = Line::from(vec![
        Span::styled("Ctrl+C", key),
        Span::styled(" exit  ", hint),
        Span::styled("Ctrl+E", key),
        Span::styled(" clear errors", hint),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
