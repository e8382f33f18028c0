//! Heading and word box
//!
//! The heading shows the phase guide and the countdown; the word box shows
//! the puzzle while guessing and the answer once revealed.

use anagram_app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
};

use crate::Theme;

/// Render the heading line.
pub fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let paragraph = Paragraph::new(app.header_text())
        .alignment(Alignment::Center)
        .style(banner_style(theme));

    frame.render_widget(paragraph, area);
}

/// Render the word box.
pub fn render_word(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let word = format!("'{}'", app.phase().display_word());
    let paragraph = Paragraph::new(word)
        .alignment(Alignment::Center)
        .style(banner_style(theme).add_modifier(Modifier::BOLD));

    frame.render_widget(paragraph, area);
}

fn banner_style(theme: &Theme) -> Style {
    Style::default().bg(theme.banner_bg).fg(theme.banner_fg)
}
