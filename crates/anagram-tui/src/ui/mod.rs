//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod banner;
mod chat;
mod input;
mod status;

use anagram_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::Theme;

const TOP_MARGIN: u16 = 1;
const BANNER_HEIGHT: u16 = 1;
const INPUT_HEIGHT: u16 = 1;
const ERROR_HEIGHT: u16 = 1;
const GAP_HEIGHT: u16 = 1;
const HOTKEYS_HEIGHT: u16 = 1;
const BORDER_SIZE: u16 = 2;

/// Render the entire UI.
///
/// The view is a fixed-width column in the top-left corner: heading, word,
/// chat box, input line, error (only when present) and hotkey hints.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let column = Rect { width: area.width.min(theme.width), ..area };

    let chat_height = (app.chat().capacity() as u16).saturating_add(BORDER_SIZE);
    let error_height = if app.last_error().is_some() { ERROR_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOP_MARGIN),
            Constraint::Length(BANNER_HEIGHT),
            Constraint::Length(BANNER_HEIGHT),
            Constraint::Length(chat_height),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(error_height),
            Constraint::Length(GAP_HEIGHT),
            Constraint::Length(HOTKEYS_HEIGHT),
            Constraint::Min(0),
        ])
        .split(column);

    let [_, header_area, word_area, chat_area, input_area, error_area, _, hotkeys_area, _] =
        chunks.as_ref()
    else {
        return;
    };

    banner::render_header(frame, app, theme, *header_area);
    banner::render_word(frame, app, theme, *word_area);
    chat::render(frame, app, theme, *chat_area);
    input::render(frame, app, theme, *input_area);
    status::render_error(frame, app, theme, *error_area);
    status::render_hotkeys(frame, theme, *hotkeys_area);
}
