//! Inbound message decoding.
//!
//! Frames are decoded in two stages: the envelope (`type` tag + raw `content`)
//! and then the content, deserialized into a typed struct chosen by the tag.
//! Shape mismatches become [`DecodeError`]s instead of runtime casts.
//!
//! # Invariants
//!
//! - Unknown tags are not errors: they decode to
//!   [`InboundEvent::Unrecognized`] so the reader can keep going.
//! - `content` is ignored for tags that carry no payload.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{DecodeError, Result, Timestamp};

/// Keepalive payload written by the client on a fixed period.
pub const PING_PAYLOAD: &str = "/ping";

/// Events decoded from server frames.
///
/// This is the only shape that crosses from the decoder into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Chat line to append to the log.
    Chat(String),

    /// A round began.
    RoundStarted {
        /// Puzzle text to display.
        word: String,
        /// When guessing closes.
        finish: Timestamp,
    },

    /// A round ended.
    RoundFinished {
        /// The solution.
        answer: String,
        /// When the next round starts.
        next_round: Timestamp,
    },

    /// The game ended; no round is active.
    GameFinished,

    /// Reply to a keepalive ping.
    Pong,

    /// Frame with a tag this client does not know.
    Unrecognized(String),
}

/// Message tags understood by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    ChatMessage,
    OngoingRoundInfo,
    FinishedRoundInfo,
    FinishedGame,
    PongMessage,
}

impl MessageKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ChatMessage" => Some(Self::ChatMessage),
            "OngoingRoundInfo" => Some(Self::OngoingRoundInfo),
            "FinishedRoundInfo" => Some(Self::FinishedRoundInfo),
            "FinishedGame" => Some(Self::FinishedGame),
            "PongMessage" => Some(Self::PongMessage),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::ChatMessage => "ChatMessage",
            Self::OngoingRoundInfo => "OngoingRoundInfo",
            Self::FinishedRoundInfo => "FinishedRoundInfo",
            Self::FinishedGame => "FinishedGame",
            Self::PongMessage => "PongMessage",
        }
    }
}

/// Content of `OngoingRoundInfo`.
#[derive(Debug, Deserialize)]
struct OngoingRoundInfo {
    word_to_guess: String,
    round_finish_time: String,
}

/// Content of `FinishedRoundInfo`.
#[derive(Debug, Deserialize)]
struct FinishedRoundInfo {
    word_answer: String,
    to_next_round_time: String,
}

/// Decode one text frame.
///
/// # Errors
///
/// - `DecodeError::Malformed` if the frame is not a JSON object with a string
///   `type` field
/// - `DecodeError::InvalidContent` if `content` is missing or has the wrong
///   shape for a known tag
pub fn decode(text: &str) -> Result<InboundEvent> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let Value::Object(mut envelope) = value else {
        return Err(DecodeError::Malformed("expected a JSON object".to_string()));
    };

    let tag = match envelope.remove("type") {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            return Err(DecodeError::Malformed(format!("`type` must be a string, got {other}")));
        },
        None => return Err(DecodeError::Malformed("missing `type`".to_string())),
    };

    let Some(kind) = MessageKind::from_tag(&tag) else {
        return Ok(InboundEvent::Unrecognized(tag));
    };

    let content = envelope.remove("content");

    match kind {
        MessageKind::ChatMessage => {
            let text: String = decode_content(kind, content)?;
            Ok(InboundEvent::Chat(text))
        },
        MessageKind::OngoingRoundInfo => {
            let info: OngoingRoundInfo = decode_content(kind, content)?;
            Ok(InboundEvent::RoundStarted {
                word: info.word_to_guess,
                finish: Timestamp::parse(&info.round_finish_time),
            })
        },
        MessageKind::FinishedRoundInfo => {
            let info: FinishedRoundInfo = decode_content(kind, content)?;
            Ok(InboundEvent::RoundFinished {
                answer: info.word_answer,
                next_round: Timestamp::parse(&info.to_next_round_time),
            })
        },
        MessageKind::FinishedGame => Ok(InboundEvent::GameFinished),
        MessageKind::PongMessage => Ok(InboundEvent::Pong),
    }
}

fn decode_content<T: DeserializeOwned>(kind: MessageKind, content: Option<Value>) -> Result<T> {
    let value = content.ok_or_else(|| DecodeError::InvalidContent {
        kind: kind.tag(),
        reason: "missing content".to_string(),
    })?;

    serde_json::from_value(value)
        .map_err(|e| DecodeError::InvalidContent { kind: kind.tag(), reason: e.to_string() })
}
