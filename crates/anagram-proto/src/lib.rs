//! Anagram wire protocol
//!
//! The game server speaks UTF-8 JSON over a WebSocket. Every inbound frame is
//! an object `{"type": <tag>, "content": <payload>}`; outbound frames are raw
//! text (either a guess/chat line or the keepalive [`PING_PAYLOAD`]).
//!
//! This crate only decodes. It has no I/O and no notion of time beyond parsing
//! the absolute deadlines the server sends.
//!
//! # Components
//!
//! - [`decode`]: Parse one text frame into an [`InboundEvent`]
//! - [`Timestamp`]: Server deadline, parsed or kept as malformed text
//! - [`DecodeError`]: Why a frame could not be turned into an event

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod message;
mod timestamp;

pub use errors::{DecodeError, Result};
pub use message::{InboundEvent, PING_PAYLOAD, decode};
pub use timestamp::Timestamp;
