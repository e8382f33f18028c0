//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic.
///
/// Every command except [`next_event`](Driver::next_event) must return
/// without waiting on the network. Outcomes come back later as
/// [`AppEvent`]s from `next_event`, in the order they happen.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, tokio-tungstenite for the socket
/// - **Tests**: scripted event queues that record every command
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next event.
    ///
    /// Returns `None` once no further events can arrive.
    fn next_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Start dialing `url`. Reports `Connected` or `ConnectFailed`.
    fn connect(&mut self, url: &str);

    /// Perform exactly one read. Reports `Frame`, `DecodeFailed` or
    /// `ReadFailed`.
    fn request_read(&mut self);

    /// Start writing the keepalive payload every `interval`. Reports
    /// `KeepaliveFailed` once, then stops.
    fn start_keepalive(&mut self, interval: Duration);

    /// Write `text` to the server. Reports `Sent` or `SendFailed`.
    fn send(&mut self, text: String);

    /// Replace the countdown ticker with one emitting `Tick { countdown: id }`
    /// every `interval`.
    fn start_countdown(&mut self, id: u64, interval: Duration);

    /// Stop the countdown ticker, if any.
    fn stop_countdown(&mut self);

    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop background work and drop the connection.
    fn stop(&mut self);
}
