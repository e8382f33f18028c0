//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use std::time::Duration;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Dial the server.
    Connect {
        /// WebSocket URL.
        server_url: String,
    },

    /// Issue the next read. At most one read is ever outstanding.
    ReadNext,

    /// Start pinging the server.
    StartKeepalive {
        /// Ping period.
        interval: Duration,
    },

    /// Write user input to the server.
    Send {
        /// Text to send verbatim.
        text: String,
    },

    /// Replace the countdown ticker.
    StartCountdown {
        /// Countdown id carried by each tick.
        id: u64,
        /// Tick period.
        interval: Duration,
    },

    /// Stop the countdown ticker.
    StopCountdown,
}
