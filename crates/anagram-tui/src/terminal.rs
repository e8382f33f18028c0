//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Network uses tokio-tungstenite.
//!
//! Every network operation runs on its own task and reports back through one
//! channel, which [`Driver::next_event`] merges with terminal input.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use anagram_app::{App, AppEvent, Driver, KeyInput};
use chrono::{DateTime, Utc};
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::{
    sync::mpsc,
    task::AbortHandle,
    time::{Instant, interval_at},
};

use crate::{
    Theme,
    transport::{self, Connection, SharedWriter},
    ui,
};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Messages from background tasks to the driver.
enum DriverMsg {
    /// Dial succeeded; the driver takes ownership of the socket.
    Connected(Connection),
    /// Event for the App.
    App(AppEvent),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the WebSocket
/// session (tokio-tungstenite).
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    theme: Theme,
    events_tx: mpsc::UnboundedSender<DriverMsg>,
    events_rx: mpsc::UnboundedReceiver<DriverMsg>,
    writer: Option<SharedWriter>,
    read_permits: Option<mpsc::UnboundedSender<()>>,
    countdown: Option<AbortHandle>,
    tasks: Vec<AbortHandle>,
}

impl TerminalDriver {
    /// Create a new terminal driver.
    pub fn new(theme: Theme) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            event_stream,
            theme,
            events_tx,
            events_rx,
            writer: None,
            read_permits: None,
            countdown: None,
            tasks: Vec::new(),
        })
    }

    /// Convert a crossterm key event to `KeyInput`.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char(c) => Some(KeyInput::Ctrl(c.to_ascii_lowercase())),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    /// Take ownership of a dialed socket and start the reader.
    fn install(&mut self, connection: Connection) {
        let Connection { writer, reader } = connection;
        let (permits_tx, permits_rx) = mpsc::unbounded_channel();
        let events = self.events_tx.clone();

        let handle = tokio::spawn(transport::read_loop(reader, permits_rx, move |event| {
            events.send(DriverMsg::App(event)).is_ok()
        }));

        self.tasks.push(handle.abort_handle());
        self.writer = Some(writer);
        self.read_permits = Some(permits_tx);
    }

    fn spawn_tracked<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|handle| !handle.is_finished());
        self.tasks.push(tokio::spawn(task).abort_handle());
    }

    fn report(&self, event: AppEvent) {
        // Receiver lives in self.
        let _ = self.events_tx.send(DriverMsg::App(event));
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn next_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            tokio::select! {
                // Terminal events
                maybe_event = self.event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if let Some(key_input) = Self::convert_key(key) {
                                return Ok(Some(AppEvent::Key(key_input)));
                            }
                        },
                        Some(Ok(Event::Resize(cols, rows))) => {
                            return Ok(Some(AppEvent::Resize(cols, rows)));
                        },
                        Some(Ok(_)) => {},
                        Some(Err(e)) => return Err(TerminalError::Io(e)),
                        None => return Ok(None),
                    }
                }

                // Background task results
                Some(msg) = self.events_rx.recv() => {
                    return Ok(Some(match msg {
                        DriverMsg::Connected(connection) => {
                            self.install(connection);
                            AppEvent::Connected
                        },
                        DriverMsg::App(event) => event,
                    }));
                }
            }
        }
    }

    fn connect(&mut self, url: &str) {
        let url = url.to_string();
        let events = self.events_tx.clone();

        self.spawn_tracked(async move {
            let msg = match transport::connect(&url).await {
                Ok(connection) => DriverMsg::Connected(connection),
                Err(e) => {
                    tracing::warn!(%url, error = %e, "dial failed");
                    DriverMsg::App(AppEvent::ConnectFailed { reason: e.to_string() })
                },
            };
            let _ = events.send(msg);
        });
    }

    fn request_read(&mut self) {
        let granted = self.read_permits.as_ref().is_some_and(|permits| permits.send(()).is_ok());
        if !granted {
            self.report(AppEvent::ReadFailed { reason: "not connected".to_string(), closed: true });
        }
    }

    fn start_keepalive(&mut self, interval: Duration) {
        let Some(writer) = self.writer.clone() else {
            self.report(AppEvent::KeepaliveFailed { reason: "not connected".to_string() });
            return;
        };
        let events = self.events_tx.clone();

        self.spawn_tracked(async move {
            let e = transport::keepalive(writer, interval).await;
            tracing::warn!(error = %e, "keepalive failed");
            let _ = events.send(DriverMsg::App(AppEvent::KeepaliveFailed { reason: e.to_string() }));
        });
    }

    fn send(&mut self, text: String) {
        let Some(writer) = self.writer.clone() else {
            self.report(AppEvent::SendFailed { reason: "not connected".to_string() });
            return;
        };
        let events = self.events_tx.clone();

        self.spawn_tracked(async move {
            let event = match transport::send_text(&writer, &text).await {
                Ok(()) => AppEvent::Sent,
                Err(e) => AppEvent::SendFailed { reason: e.to_string() },
            };
            let _ = events.send(DriverMsg::App(event));
        });
    }

    fn start_countdown(&mut self, id: u64, interval: Duration) {
        self.stop_countdown();
        let events = self.events_tx.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            loop {
                ticker.tick().await;
                if events.send(DriverMsg::App(AppEvent::Tick { countdown: id })).is_err() {
                    break;
                }
            }
        });
        self.countdown = Some(handle.abort_handle());
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app, &self.theme);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_countdown();
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
        self.read_permits = None;
        self.writer = None;
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
