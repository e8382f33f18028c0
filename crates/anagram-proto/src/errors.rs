//! Decode errors.
//!
//! A frame that cannot be turned into an [`crate::InboundEvent`] is never a
//! reason to stop reading. Callers surface the error and move on to the next
//! frame.

use thiserror::Error;

/// Result alias for decoding.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors produced while decoding an inbound frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame is not a JSON object with a string `type` field.
    #[error("malformed frame: {0}")]
    Malformed(String),

    /// `content` is missing or does not have the shape the tag requires.
    #[error("invalid {kind} content: {reason}")]
    InvalidContent {
        /// Message tag whose content failed to decode
        kind: &'static str,
        /// Underlying deserialization failure
        reason: String,
    },

    /// A deadline field was present but not valid RFC 3339.
    #[error("invalid timestamp {raw:?}: {reason}")]
    InvalidTimestamp {
        /// Text received from the server
        raw: String,
        /// Parser failure
        reason: String,
    },

    /// Server sent a binary frame; the protocol is text only.
    #[error("unexpected binary frame ({len} bytes)")]
    BinaryFrame {
        /// Frame length in bytes
        len: usize,
    },
}
