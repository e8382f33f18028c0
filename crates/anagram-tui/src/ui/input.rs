//! Input line
//!
//! Displays the input buffer with cursor, or the placeholder when empty.

use anagram_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

const PROMPT: &str = "> ";
const PROMPT_WIDTH: u16 = 2;
const RIGHT_PADDING: u16 = 1;

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let input = app.input();

    let content = if input.is_empty() {
        Span::styled(app.input_placeholder(), Style::default().fg(theme.muted))
    } else {
        Span::styled(input.buffer().to_string(), Style::default().fg(Color::White))
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::raw(PROMPT), content]));

    frame.render_widget(paragraph, area);

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = (input.cursor() as u16).min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    let cursor_x = cursor_x.min(max_x);

    frame.set_cursor_position((cursor_x, area.y));
}
