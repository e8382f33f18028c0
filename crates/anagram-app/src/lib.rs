//! Application layer for the anagram client
//!
//! Pure state machines and a generic runtime for the game session, so the
//! same orchestration runs against a real terminal and socket or against a
//! scripted driver in tests.
//!
//! # Components
//!
//! - [`App`]: session state machine (connection, rounds, chat, input)
//! - [`RoundPhase`] and [`Countdown`]: round lifecycle and time left
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod config;
mod driver;
mod error;
mod event;
mod input;
pub mod round;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use config::{
    ClientConfig, DEFAULT_CHAT_CAPACITY, DEFAULT_COUNTDOWN_INTERVAL, DEFAULT_KEEPALIVE_INTERVAL,
    DEFAULT_SERVER_URL,
};
pub use driver::Driver;
pub use error::SessionError;
pub use event::AppEvent;
pub use input::{InputState, KeyInput, LocalCommand, MANUAL_PING_REJECTION, Submission, classify};
pub use round::{Countdown, RoundPhase, Transition};
pub use runtime::Runtime;
pub use state::{ChatLog, ConnectionState};
