//! Keyboard input and submission classification.
//!
//! [`InputState`] is a single-line editor; the rest of the session only sees
//! its buffer when Enter is pressed. [`classify`] decides what a submitted
//! line means: a local command, a payload for the server, or something the
//! client refuses to send.

use anagram_proto::PING_PAYLOAD;

/// Error shown when the user types the keepalive payload by hand.
pub const MANUAL_PING_REJECTION: &str =
    "don't ping manually! this is handled automatically by the client";

/// Terminal-agnostic keyboard input.
///
/// Decouples application logic from terminal libraries so the session can be
/// driven from tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Character typed with Ctrl held.
    Ctrl(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

/// Commands handled locally, never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    /// `/exit`: end the session.
    Quit,
    /// `/clear`: empty the chat log.
    ClearChat,
}

/// Meaning of a submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Nothing but whitespace.
    Empty,
    /// Local command.
    Command(LocalCommand),
    /// Refused; nothing is sent.
    Rejected(String),
    /// Text to send to the server verbatim.
    Payload(String),
}

/// Classify a submitted line. Surrounding whitespace is ignored.
pub fn classify(line: &str) -> Submission {
    match line.trim() {
        "" => Submission::Empty,
        "/exit" => Submission::Command(LocalCommand::Quit),
        "/clear" => Submission::Command(LocalCommand::ClearChat),
        PING_PAYLOAD => Submission::Rejected(MANUAL_PING_REJECTION.to_string()),
        text => Submission::Payload(text.to_string()),
    }
}

/// Single-line text editor.
///
/// # Invariants
///
/// - `cursor <= buffer.chars().count()`. The cursor counts characters, not
///   bytes, so multi-byte input edits cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Editor holds no text.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Empty the buffer and reset the cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns `false` for keys that do not edit.
    pub fn edit(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => {
                if self.cursor < self.len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
            },
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.len(),
            KeyInput::Ctrl(_) | KeyInput::Enter => return false,
        }
        true
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}
