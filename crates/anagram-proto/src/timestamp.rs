//! Server-supplied deadlines.

use chrono::{DateTime, Utc};

use crate::DecodeError;

/// Absolute instant sent by the server.
///
/// A malformed timestamp does not invalidate the frame carrying it: the round
/// transition still happens, with the deadline collapsed to "now". Keeping the
/// raw text lets the state machine report what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// Parsed RFC 3339 instant, normalized to UTC.
    At(DateTime<Utc>),
    /// Text that failed to parse.
    Malformed {
        /// Text received from the server
        raw: String,
        /// Parser failure
        reason: String,
    },
}

impl Timestamp {
    /// Parse an RFC 3339 timestamp. Never fails; bad input becomes
    /// [`Timestamp::Malformed`].
    pub fn parse(raw: &str) -> Self {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(at) => Self::At(at.with_timezone(&Utc)),
            Err(e) => Self::Malformed { raw: raw.to_string(), reason: e.to_string() },
        }
    }

    /// Instant to count down to, falling back to `now` for malformed input.
    ///
    /// The error is returned alongside the fallback so the caller can record
    /// it without dropping the transition.
    pub fn resolve(&self, now: DateTime<Utc>) -> (DateTime<Utc>, Option<DecodeError>) {
        match self {
            Self::At(at) => (*at, None),
            Self::Malformed { raw, reason } => (
                now,
                Some(DecodeError::InvalidTimestamp { raw: raw.clone(), reason: reason.clone() }),
            ),
        }
    }
}
