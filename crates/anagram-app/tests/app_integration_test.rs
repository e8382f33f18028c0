//! Integration tests for App behavior.
//!
//! Frames are fed as raw JSON through the real decoder, the way the read
//! loop delivers them.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - App state reflects expected state
//! - The read loop keeps exactly one read armed
//! - Outbound writes happen only when they should

use std::time::Duration;

use anagram_app::{
    App, AppAction, AppEvent, ClientConfig, ConnectionState, KeyInput, MANUAL_PING_REJECTION,
    RoundPhase, SessionError,
};
use anagram_proto::{DecodeError, decode};
use chrono::{DateTime, TimeDelta, Utc};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2099-01-01T00:00:00Z").map(|t| t.to_utc()).unwrap_or_default()
}

/// Create a connected App with its first read armed.
fn connected_app() -> App {
    let mut app = App::new(ClientConfig::default());
    app.connect();
    app.handle(AppEvent::Connected, now());
    app
}

/// Deliver one raw frame the way the read loop does.
fn receive(app: &mut App, raw: &str, at: DateTime<Utc>) -> Vec<AppAction> {
    let event = match decode(raw) {
        Ok(inbound) => AppEvent::Frame(inbound),
        Err(e) => AppEvent::DecodeFailed(e),
    };
    app.handle(event, at)
}

/// Type a line and press Enter.
fn submit(app: &mut App, line: &str) -> Vec<AppAction> {
    for c in line.chars() {
        app.handle(AppEvent::Key(KeyInput::Char(c)), now());
    }
    app.handle(AppEvent::Key(KeyInput::Enter), now())
}

fn sends(actions: &[AppAction]) -> usize {
    actions.iter().filter(|a| matches!(a, AppAction::Send { .. })).count()
}

#[test]
fn ongoing_round_enters_active() {
    let mut app = connected_app();

    let actions = receive(
        &mut app,
        r#"{"type":"OngoingRoundInfo","content":{"word_to_guess":"apple","round_finish_time":"2099-01-01T00:00:10Z"}}"#,
        now(),
    );

    let deadline = now() + TimeDelta::seconds(10);
    assert_eq!(app.phase(), &RoundPhase::Active { word: "apple".into(), deadline });
    assert_eq!(app.phase().guide(), "PLEASE GUESS!");
    assert_eq!(app.countdown().map(|c| c.remaining()), Some(Duration::from_secs(10)));
    assert!(actions.contains(&AppAction::ReadNext));
    assert!(app.last_error().is_none());
}

#[test]
fn finished_round_reveals_answer() {
    let mut app = connected_app();

    receive(
        &mut app,
        r#"{"type":"FinishedRoundInfo","content":{"word_answer":"apple","to_next_round_time":"2099-01-01T00:00:05Z"}}"#,
        now(),
    );

    assert!(matches!(app.phase(), RoundPhase::Revealed { answer, .. } if answer == "apple"));
    assert_eq!(app.phase().display_word(), "apple");
    assert_eq!(app.header_text(), "TIME'S UP! THE ANSWER: - 5.0s");
}

#[test]
fn deadline_in_the_past_clamps_to_zero() {
    let mut app = connected_app();

    let actions = receive(
        &mut app,
        r#"{"type":"OngoingRoundInfo","content":{"word_to_guess":"late","round_finish_time":"2098-12-31T23:59:00Z"}}"#,
        now(),
    );

    assert_eq!(app.countdown().map(|c| c.remaining()), Some(Duration::ZERO));
    assert!(actions.contains(&AppAction::StopCountdown));
    assert_eq!(app.header_text(), "PLEASE GUESS!");
}

#[test]
fn malformed_timestamp_still_transitions() {
    for raw in [
        r#"{"type":"OngoingRoundInfo","content":{"word_to_guess":"apple","round_finish_time":"soon"}}"#,
        r#"{"type":"FinishedRoundInfo","content":{"word_answer":"apple","to_next_round_time":"later"}}"#,
    ] {
        let mut app = connected_app();
        receive(&mut app, raw, now());

        assert_ne!(app.phase(), &RoundPhase::AwaitingStart);
        assert_eq!(app.countdown().map(|c| c.remaining()), Some(Duration::ZERO));
        assert_eq!(app.countdown().map(|c| c.deadline()), Some(now()));
        assert!(matches!(
            app.last_error(),
            Some(SessionError::Decode(DecodeError::InvalidTimestamp { .. }))
        ));
    }
}

#[test]
fn finished_game_resets_from_any_phase() {
    let priors = [
        None,
        Some(
            r#"{"type":"OngoingRoundInfo","content":{"word_to_guess":"a","round_finish_time":"2099-01-01T00:00:10Z"}}"#,
        ),
        Some(
            r#"{"type":"FinishedRoundInfo","content":{"word_answer":"a","to_next_round_time":"2099-01-01T00:00:10Z"}}"#,
        ),
    ];

    for prior in priors {
        let mut app = connected_app();
        if let Some(raw) = prior {
            receive(&mut app, raw, now());
        }

        receive(&mut app, r#"{"type":"FinishedGame"}"#, now());
        assert_eq!(app.phase(), &RoundPhase::AwaitingStart);
        assert!(app.countdown().is_none());
    }
}

#[test]
fn unknown_type_records_error_and_keeps_reading() {
    let mut app = connected_app();
    receive(
        &mut app,
        r#"{"type":"OngoingRoundInfo","content":{"word_to_guess":"apple","round_finish_time":"2099-01-01T00:00:10Z"}}"#,
        now(),
    );
    let before = app.phase().clone();

    let actions = receive(&mut app, r#"{"type":"Weird"}"#, now());

    assert_eq!(app.phase(), &before);
    let error = app.last_error().map(ToString::to_string).unwrap_or_default();
    assert!(error.contains("Weird"), "error should name the tag: {error}");
    assert!(actions.contains(&AppAction::ReadNext));
}

#[test]
fn undecodable_frame_keeps_reading() {
    let mut app = connected_app();

    let actions = receive(&mut app, "not json", now());

    assert!(matches!(app.last_error(), Some(SessionError::Decode(DecodeError::Malformed(_)))));
    assert_eq!(actions, [AppAction::ReadNext, AppAction::Render]);
}

#[test]
fn chat_lines_arrive_in_order() {
    let mut app = connected_app();
    for i in 0..20 {
        receive(&mut app, &format!(r#"{{"type":"ChatMessage","content":"line {i}"}}"#), now());
    }

    let lines: Vec<_> = app.chat().iter().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines.first(), Some(&"line 8"));
    assert_eq!(lines.last(), Some(&"line 19"));
}

#[test]
fn pong_changes_nothing_visible() {
    let mut app = connected_app();

    receive(&mut app, r#"{"type":"PongMessage"}"#, now());

    assert!(app.chat().is_empty());
    assert!(app.last_error().is_none());
    assert_eq!(app.phase(), &RoundPhase::AwaitingStart);
}

#[test]
fn exit_quits_in_every_state() {
    let setups: [fn() -> App; 3] = [
        || App::new(ClientConfig::default()),
        connected_app,
        || {
            let mut app = App::new(ClientConfig::default());
            app.handle(AppEvent::ConnectFailed { reason: "refused".into() }, now());
            app
        },
    ];

    for setup in setups {
        let mut app = setup();
        assert_eq!(submit(&mut app, " /exit "), [AppAction::Quit]);
    }
}

#[test]
fn ctrl_c_quits_with_any_buffer() {
    let mut app = connected_app();
    for c in "half typed".chars() {
        app.handle(AppEvent::Key(KeyInput::Char(c)), now());
    }

    assert_eq!(app.handle(AppEvent::Key(KeyInput::Ctrl('c')), now()), [AppAction::Quit]);
}

#[test]
fn manual_ping_is_rejected() {
    for mut app in [App::new(ClientConfig::default()), connected_app()] {
        let actions = submit(&mut app, "/ping");

        assert_eq!(sends(&actions), 0);
        assert_eq!(app.last_error(), Some(&SessionError::Rejected(MANUAL_PING_REJECTION.into())));
    }
}

#[test]
fn clear_works_without_connection() {
    let mut app = App::new(ClientConfig::default());
    app.handle(AppEvent::ConnectFailed { reason: "refused".into() }, now());

    submit(&mut app, "/clear");

    assert!(app.chat().is_empty());
    assert!(app.input().is_empty());
}

#[test]
fn clear_empties_chat_and_input() {
    let mut app = connected_app();
    receive(&mut app, r#"{"type":"ChatMessage","content":"hello"}"#, now());

    submit(&mut app, " /clear ");

    assert!(app.chat().is_empty());
    assert!(app.input().is_empty());
}

#[test]
fn text_while_disconnected_is_noop() {
    let mut app = App::new(ClientConfig::default());
    app.connect();

    let actions = submit(&mut app, "apple");

    assert!(actions.is_empty());
    assert_eq!(app.input().buffer(), "apple");
    assert!(app.last_error().is_none());
}

#[test]
fn text_while_connected_is_sent_trimmed() {
    let mut app = connected_app();

    let actions = submit(&mut app, "  apple  ");

    assert_eq!(actions, [AppAction::Send { text: "apple".into() }]);
    app.handle(AppEvent::Sent, now());
    assert!(app.input().is_empty());
}

#[test]
fn keepalive_started_once_on_connect() {
    let mut app = App::new(ClientConfig::default());
    app.connect();

    let actions = app.handle(AppEvent::Connected, now());
    assert!(actions.contains(&AppAction::StartKeepalive { interval: Duration::from_secs(10) }));

    // Typing does not touch the keepalive.
    let typing = submit(&mut app, "abc");
    assert!(!typing.iter().any(|a| matches!(a, AppAction::StartKeepalive { .. })));
}

#[test]
fn keepalive_failure_is_shown_but_not_fatal() {
    let mut app = connected_app();

    let actions = app.handle(AppEvent::KeepaliveFailed { reason: "broken pipe".into() }, now());

    assert_eq!(actions, [AppAction::Render]);
    assert_eq!(app.connection_state(), ConnectionState::Connected);
    assert!(matches!(app.last_error(), Some(SessionError::Keepalive(_))));
}

#[test]
fn peer_close_marks_session_closed() {
    let mut app = connected_app();

    app.handle(AppEvent::ReadFailed { reason: "connection closed".into(), closed: true }, now());
    let actions = submit(&mut app, "apple");

    assert_eq!(app.connection_state(), ConnectionState::Closed);
    assert_eq!(sends(&actions), 0);
    assert!(matches!(app.last_error(), Some(SessionError::Write(_))));
    assert_eq!(app.input().buffer(), "apple");
}

#[test]
fn countdown_ticks_down() {
    let mut app = connected_app();
    receive(
        &mut app,
        r#"{"type":"OngoingRoundInfo","content":{"word_to_guess":"apple","round_finish_time":"2099-01-01T00:00:10Z"}}"#,
        now(),
    );
    let id = app.countdown().map(|c| c.id()).unwrap_or_default();

    app.handle(AppEvent::Tick { countdown: id }, now() + TimeDelta::milliseconds(500));
    assert_eq!(app.header_text(), "PLEASE GUESS! - 9.5s");

    let actions = app.handle(AppEvent::Tick { countdown: id }, now() + TimeDelta::seconds(11));
    assert_eq!(actions, [AppAction::StopCountdown, AppAction::Render]);
    assert_eq!(app.header_text(), "PLEASE GUESS!");
}
