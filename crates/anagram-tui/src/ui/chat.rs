//! Chat area
//!
//! Displays the chat log, oldest line at the top. Entries are wrapped to the
//! box width and only the bottom-most rows are kept.

use anagram_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::Theme;

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let width = area.width.saturating_sub(BORDER_SIZE) as usize;
    let rows: Vec<String> = app.chat().iter().flat_map(|entry| wrap(entry, width)).collect();

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = rows.len().saturating_sub(visible_height);
    let visible_items: Vec<ListItem> =
        rows.into_iter().skip(skip).map(|row| ListItem::new(Line::raw(row))).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

/// Split `text` into rows of at most `width` characters.
///
/// Breaks at newlines and between words; a word longer than a row is split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_len = 0;

        for word in line.split(' ') {
            let word_len = word.chars().count();
            if row_len > 0 && row_len + 1 + word_len > width {
                rows.push(std::mem::take(&mut row));
                row_len = 0;
            }
            if row_len > 0 {
                row.push(' ');
                row_len += 1;
            }
            for c in word.chars() {
                if row_len == width {
                    rows.push(std::mem::take(&mut row));
                    row_len = 0;
                }
                row.push(c);
                row_len += 1;
            }
        }
        rows.push(row);
    }

    rows
}
