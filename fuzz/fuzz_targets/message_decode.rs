//! Fuzz target for anagram_proto::decode
//!
//! This fuzzer tests inbound frame decoding with:
//! - Invalid JSON and non-object values
//! - Missing or mistyped `type` and `content`
//! - Unknown tags and garbage timestamps
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use anagram_proto::{InboundEvent, Timestamp, decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(event) = decode(text) {
        // Round timestamps always resolve, malformed or not
        let now = chrono::Utc::now();
        match event {
            InboundEvent::RoundStarted { finish: ts, .. }
            | InboundEvent::RoundFinished { next_round: ts, .. } => {
                let (_, error) = ts.resolve(now);
                assert_eq!(error.is_some(), matches!(ts, Timestamp::Malformed { .. }));
            },
            _ => {},
        }
    }
});
