//! Fuzz target for the App state machine
//!
//! Drives a session with arbitrary frames, keys, ticks and clock jumps, and
//! checks after every step that:
//! - The chat log never exceeds its capacity
//! - At most one read is outstanding

#![no_main]

use anagram_app::{App, AppAction, AppEvent, ClientConfig, KeyInput};
use anagram_proto::decode;
use arbitrary::Arbitrary;
use chrono::{DateTime, TimeDelta, Utc};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Step {
    Frame(String),
    Char(char),
    Enter,
    Backspace,
    ClearError,
    Tick(u8),
    Advance(u16),
    ReadFailed { closed: bool },
    Sent,
}

fuzz_target!(|steps: Vec<Step>| {
    let mut now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
    let mut app = App::new(ClientConfig::default());
    app.connect();
    let mut outstanding = count_reads(&app.handle(AppEvent::Connected, now));

    for step in steps {
        let event = match step {
            Step::Frame(raw) => match decode(&raw) {
                Ok(inbound) => AppEvent::Frame(inbound),
                Err(e) => AppEvent::DecodeFailed(e),
            },
            Step::Char(c) => AppEvent::Key(KeyInput::Char(c)),
            Step::Enter => AppEvent::Key(KeyInput::Enter),
            Step::Backspace => AppEvent::Key(KeyInput::Backspace),
            Step::ClearError => AppEvent::Key(KeyInput::Ctrl('e')),
            Step::Tick(id) => AppEvent::Tick { countdown: u64::from(id) },
            Step::Advance(ms) => {
                now += TimeDelta::milliseconds(i64::from(ms));
                continue;
            },
            Step::ReadFailed { closed } => {
                AppEvent::ReadFailed { reason: "fuzz".into(), closed }
            },
            Step::Sent => AppEvent::Sent,
        };

        let is_read_result = matches!(
            event,
            AppEvent::Frame(_) | AppEvent::DecodeFailed(_) | AppEvent::ReadFailed { .. }
        );
        if is_read_result {
            if outstanding == 0 {
                continue;
            }
            outstanding -= 1;
        }

        let actions = app.handle(event, now);
        if actions.contains(&AppAction::Quit) {
            return;
        }
        outstanding += count_reads(&actions);

        assert!(outstanding <= 1);
        assert!(app.chat().len() <= app.chat().capacity());
    }
});

fn count_reads(actions: &[AppAction]) -> usize {
    actions.iter().filter(|a| **a == AppAction::ReadNext).count()
}
