//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from independent producers:
//! - The user (keys, resize).
//! - The read loop (one event per resolved read).
//! - The keepalive loop and user writes (completion or failure).
//! - The countdown ticker.

use anagram_proto::{DecodeError, InboundEvent};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Countdown tick.
    Tick {
        /// Countdown the ticker was started for.
        countdown: u64,
    },

    /// Dial succeeded.
    Connected,

    /// Dial failed.
    ConnectFailed {
        /// Error description.
        reason: String,
    },

    /// A frame was read and decoded.
    Frame(InboundEvent),

    /// A frame was read but could not be decoded.
    DecodeFailed(DecodeError),

    /// The read itself failed.
    ReadFailed {
        /// Error description.
        reason: String,
        /// The peer closed the connection; further reads cannot succeed.
        closed: bool,
    },

    /// User input was written.
    Sent,

    /// User input could not be written.
    SendFailed {
        /// Error description.
        reason: String,
    },

    /// Keepalive ping could not be written; the keepalive loop has exited.
    KeepaliveFailed {
        /// Error description.
        reason: String,
    },
}
