//! Terminal UI for the anagram game
//!
//! A thin shell over [`anagram_app::Driver`] that provides terminal and
//! WebSocket I/O. All orchestration logic lives in the generic
//! [`anagram_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod theme;
pub mod transport;
pub mod ui;

pub use anagram_app::{App, AppAction, AppEvent, ClientConfig, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
pub use theme::Theme;
pub use transport::{Connection, TransportError};
