//! Session-visible errors.
//!
//! The session keeps exactly one of these at a time: a new error overwrites
//! the previous one, and the user can dismiss it. None of them stop the
//! process.

use anagram_proto::DecodeError;
use thiserror::Error;

/// Error shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Initial dial failed. The session stays display-only.
    #[error("connect failed: {0}")]
    Connect(String),

    /// Transport-level read failure.
    #[error("read failed: {0}")]
    Read(String),

    /// Frame arrived but could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Frame carried a tag this client does not know.
    #[error("unknown message type: {0}")]
    UnrecognizedMessage(String),

    /// User asked for something the client does not allow.
    #[error("{0}")]
    Rejected(String),

    /// Writing user input failed. The input is kept for retry.
    #[error("write failed: {0}")]
    Write(String),

    /// Keepalive ping could not be written. Pinging has stopped.
    #[error("keepalive failed: {0}")]
    Keepalive(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_convert_and_display_unchanged() {
        let decode = DecodeError::BinaryFrame { len: 3 };
        let error: SessionError = decode.clone().into();

        assert_eq!(error, SessionError::Decode(decode.clone()));
        assert_eq!(error.to_string(), decode.to_string());
    }
}
