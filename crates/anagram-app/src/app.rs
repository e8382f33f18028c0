//! Session state machine.
//!
//! This module defines the [`App`] state machine, the single writer of session
//! state, completely decoupled from I/O and from whichever runtime pumps it.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs (plus
//! the current wall-clock time) and produces [`crate::AppAction`]
//! instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Tracks the connection lifecycle and the single visible error.
//! - Applies decoded frames to the chat log and the round phase.
//! - Owns the countdown and decides when its ticker is replaced or stopped.
//! - Turns submitted input into local commands or outbound payloads.
//!
//! # Invariants
//!
//! - At most one read is outstanding. `ReadNext` is emitted on connect and
//!   after a read resolves, never while one is pending.
//! - Inbound events are applied in the order reads resolve.

use chrono::{DateTime, Utc};

use anagram_proto::InboundEvent;

use crate::{
    AppAction, AppEvent, ChatLog, ClientConfig, ConnectionState, Countdown, InputState, KeyInput,
    LocalCommand, RoundPhase, SessionError, Submission, Transition, classify,
    round::format_remaining,
};

/// Placeholder shown in the input line while dialing.
const CONNECTING_PLACEHOLDER: &str = "connecting...";

/// Placeholder shown in the input line while connected.
const CONNECTED_PLACEHOLDER: &str = "message/answer here, send with Enter";

/// Placeholder shown once the connection is unusable.
const OFFLINE_PLACEHOLDER: &str = "not connected, Ctrl+C to exit";

/// Session state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a socket or terminal.
#[derive(Debug, Clone)]
pub struct App {
    /// Session configuration.
    config: ClientConfig,
    /// Connection state.
    connection: ConnectionState,
    /// Latest error. `None` if nothing to show.
    last_error: Option<SessionError>,
    /// Bounded chat history.
    chat: ChatLog,
    /// Current round phase.
    phase: RoundPhase,
    /// Countdown for the current phase. `None` while awaiting a round.
    countdown: Option<Countdown>,
    /// Id handed to the next countdown.
    next_countdown_id: u64,
    /// Input line editor.
    input: InputState,
    /// A read has been requested and not yet resolved.
    read_outstanding: bool,
}

impl App {
    /// Create a new App that has not dialed yet.
    pub fn new(config: ClientConfig) -> Self {
        let chat = ChatLog::new(config.chat_capacity);
        Self {
            config,
            connection: ConnectionState::Connecting,
            last_error: None,
            chat,
            phase: RoundPhase::AwaitingStart,
            countdown: None,
            next_countdown_id: 0,
            input: InputState::new(),
            read_outstanding: false,
        }
    }

    /// Initiate the single connection attempt.
    pub fn connect(&mut self) -> Vec<AppAction> {
        self.connection = ConnectionState::Connecting;
        vec![AppAction::Connect { server_url: self.config.server_url.clone() }, AppAction::Render]
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent, now: DateTime<Utc>) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(..) => vec![AppAction::Render],
            AppEvent::Tick { countdown } => self.handle_tick(countdown, now),
            AppEvent::Connected => {
                if self.connection != ConnectionState::Connecting {
                    tracing::warn!(state = ?self.connection, "ignoring duplicate connect result");
                    return vec![];
                }
                tracing::info!(url = %self.config.server_url, "connected");
                self.connection = ConnectionState::Connected;

                let mut actions = Vec::new();
                self.rearm_read(&mut actions);
                actions.push(AppAction::StartKeepalive { interval: self.config.keepalive_interval });
                actions.push(AppAction::Render);
                actions
            },
            AppEvent::ConnectFailed { reason } => {
                tracing::warn!(%reason, "connect failed");
                self.connection = ConnectionState::Failed;
                self.last_error = Some(SessionError::Connect(reason));
                vec![AppAction::Render]
            },
            AppEvent::Frame(inbound) => {
                self.read_outstanding = false;
                let mut actions = self.apply_inbound(inbound, now);
                self.rearm_read(&mut actions);
                actions.push(AppAction::Render);
                actions
            },
            AppEvent::DecodeFailed(error) => {
                tracing::warn!(%error, "dropping undecodable frame");
                self.read_outstanding = false;
                self.last_error = Some(error.into());

                let mut actions = Vec::new();
                self.rearm_read(&mut actions);
                actions.push(AppAction::Render);
                actions
            },
            AppEvent::ReadFailed { reason, closed } => {
                tracing::warn!(%reason, closed, "read failed");
                self.read_outstanding = false;
                self.last_error = Some(SessionError::Read(reason));

                let mut actions = Vec::new();
                if closed {
                    self.connection = ConnectionState::Closed;
                } else {
                    self.rearm_read(&mut actions);
                }
                actions.push(AppAction::Render);
                actions
            },
            AppEvent::Sent => {
                self.input.clear();
                vec![AppAction::Render]
            },
            AppEvent::SendFailed { reason } => {
                self.last_error = Some(SessionError::Write(reason));
                vec![AppAction::Render]
            },
            AppEvent::KeepaliveFailed { reason } => {
                tracing::warn!(%reason, "keepalive stopped");
                self.last_error = Some(SessionError::Keepalive(reason));
                vec![AppAction::Render]
            },
        }
    }

    /// Dismiss the current error.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Ctrl('c') => vec![AppAction::Quit],
            KeyInput::Ctrl('e') => {
                self.clear_error();
                vec![AppAction::Render]
            },
            KeyInput::Ctrl(_) => vec![],
            KeyInput::Enter => self.submit(),
            KeyInput::Char(_)
            | KeyInput::Backspace
            | KeyInput::Delete
            | KeyInput::Left
            | KeyInput::Right
            | KeyInput::Home
            | KeyInput::End => {
                self.input.edit(key);
                vec![AppAction::Render]
            },
        }
    }

    /// Handle Enter: run a local command or send the line.
    ///
    /// The buffer is only cleared for `/clear` here; a sent payload is
    /// cleared once the write succeeds.
    fn submit(&mut self) -> Vec<AppAction> {
        match classify(self.input.buffer()) {
            Submission::Empty => vec![],
            Submission::Command(LocalCommand::Quit) => vec![AppAction::Quit],
            Submission::Command(LocalCommand::ClearChat) => {
                self.chat.clear();
                self.input.clear();
                vec![AppAction::Render]
            },
            Submission::Rejected(reason) => {
                self.last_error = Some(SessionError::Rejected(reason));
                vec![AppAction::Render]
            },
            Submission::Payload(text) => match self.connection {
                ConnectionState::Connected => vec![AppAction::Send { text }],
                ConnectionState::Closed => {
                    self.last_error =
                        Some(SessionError::Write("connection closed by server".to_string()));
                    vec![AppAction::Render]
                },
                ConnectionState::Connecting | ConnectionState::Failed => vec![],
            },
        }
    }

    fn handle_tick(&mut self, id: u64, now: DateTime<Utc>) -> Vec<AppAction> {
        let Some(countdown) = self.countdown.as_mut().filter(|c| c.id() == id) else {
            return vec![];
        };

        countdown.update(now);
        if countdown.is_expired() {
            vec![AppAction::StopCountdown, AppAction::Render]
        } else {
            vec![AppAction::Render]
        }
    }

    fn apply_inbound(&mut self, inbound: InboundEvent, now: DateTime<Utc>) -> Vec<AppAction> {
        match &inbound {
            InboundEvent::Chat(line) => {
                self.chat.push(line.clone());
                return vec![];
            },
            InboundEvent::Pong => {
                tracing::trace!("pong");
                return vec![];
            },
            InboundEvent::Unrecognized(tag) => {
                tracing::warn!(%tag, "unrecognized message type");
                self.last_error = Some(SessionError::UnrecognizedMessage(tag.clone()));
                return vec![];
            },
            InboundEvent::RoundStarted { .. }
            | InboundEvent::RoundFinished { .. }
            | InboundEvent::GameFinished => {},
        }

        let Transition::Entered { phase, timestamp_error } = self.phase.apply(&inbound, now) else {
            return vec![];
        };

        if let Some(error) = timestamp_error {
            tracing::warn!(%error, "deadline unreadable, counting down from now");
            self.last_error = Some(error.into());
        }

        tracing::debug!(guide = phase.guide(), "round phase changed");
        self.phase = phase;
        self.restart_countdown(now)
    }

    /// Replace the countdown for the current phase.
    fn restart_countdown(&mut self, now: DateTime<Utc>) -> Vec<AppAction> {
        let Some(deadline) = self.phase.deadline() else {
            self.countdown = None;
            return vec![AppAction::StopCountdown];
        };

        self.next_countdown_id = self.next_countdown_id.wrapping_add(1);
        let countdown = Countdown::new(self.next_countdown_id, deadline, now);
        let action = if countdown.is_expired() {
            AppAction::StopCountdown
        } else {
            AppAction::StartCountdown {
                id: countdown.id(),
                interval: self.config.countdown_interval,
            }
        };
        self.countdown = Some(countdown);

        vec![action]
    }

    fn rearm_read(&mut self, actions: &mut Vec<AppAction>) {
        if self.connection == ConnectionState::Connected && !self.read_outstanding {
            self.read_outstanding = true;
            actions.push(AppAction::ReadNext);
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    /// Latest error. `None` if nothing to show.
    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Chat history.
    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    /// Current round phase.
    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    /// Countdown for the current phase. `None` while awaiting a round.
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Input line editor.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// A read is pending.
    pub fn is_read_outstanding(&self) -> bool {
        self.read_outstanding
    }

    /// Heading: the phase guide, followed by the time left while counting.
    pub fn header_text(&self) -> String {
        let guide = self.phase.guide();
        match &self.countdown {
            Some(countdown) if !countdown.is_expired() => {
                format!("{guide} - {}", format_remaining(countdown.remaining()))
            },
            _ => guide.to_string(),
        }
    }

    /// Placeholder for the empty input line.
    pub fn input_placeholder(&self) -> &'static str {
        match self.connection {
            ConnectionState::Connecting => CONNECTING_PLACEHOLDER,
            ConnectionState::Connected => CONNECTED_PLACEHOLDER,
            ConnectionState::Failed | ConnectionState::Closed => OFFLINE_PLACEHOLDER,
        }
    }
}
