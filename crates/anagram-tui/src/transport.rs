//! WebSocket transport for the client.
//!
//! Provides [`Connection`], the two halves of one dialed socket. This is a
//! thin layer that reads and writes text frames; session logic remains in the
//! Sans-IO [`anagram_app::App`].
//!
//! The read half is owned by exactly one reader. The write half is shared
//! between the keepalive loop and user sends behind an async mutex, so whole
//! frames are never interleaved.

use std::{sync::Arc, time::Duration};

use anagram_app::AppEvent;
use anagram_proto::{DecodeError, PING_PAYLOAD, decode};
use futures::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use thiserror::Error;
use tokio::{net::TcpStream, sync::Mutex, time::Instant};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, Message, error::ProtocolError},
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Write half, shared by every writer.
pub type SharedWriter = Arc<Mutex<SplitSink<WsStream, Message>>>;

/// Read half.
pub type Reader = SplitStream<WsStream>;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Dial or handshake failed.
    #[error(transparent)]
    Connect(tungstenite::Error),

    /// Writing a frame failed.
    #[error(transparent)]
    Write(tungstenite::Error),
}

/// A dialed WebSocket, split into halves.
pub struct Connection {
    /// Shared write half.
    pub writer: SharedWriter,
    /// Read half.
    pub reader: Reader,
}

/// Dial `url` and complete the WebSocket handshake.
pub async fn connect(url: &str) -> Result<Connection, TransportError> {
    let (ws, _response) = connect_async(url).await.map_err(TransportError::Connect)?;
    tracing::debug!(%url, "websocket handshake complete");

    let (sink, reader) = ws.split();
    Ok(Connection { writer: Arc::new(Mutex::new(sink)), reader })
}

/// Write one text frame.
pub async fn send_text(writer: &SharedWriter, text: &str) -> Result<(), TransportError> {
    let mut sink = writer.lock().await;
    sink.send(Message::Text(text.to_owned().into())).await.map_err(TransportError::Write)
}

/// Wait for one data frame and turn it into an event.
///
/// Control frames are consumed without resolving the read. A close frame,
/// end of stream, or a closed socket resolves with `closed = true`.
pub async fn read_next(reader: &mut Reader) -> AppEvent {
    loop {
        let message = match reader.next().await {
            Some(Ok(message)) => message,
            Some(Err(e)) => {
                let closed = is_closed(&e);
                return AppEvent::ReadFailed { reason: e.to_string(), closed };
            },
            None => {
                return AppEvent::ReadFailed {
                    reason: "connection closed".to_string(),
                    closed: true,
                };
            },
        };

        match message {
            Message::Text(text) => {
                tracing::debug!(len = text.len(), "frame received");
                return match decode(text.as_str()) {
                    Ok(event) => AppEvent::Frame(event),
                    Err(e) => AppEvent::DecodeFailed(e),
                };
            },
            Message::Binary(data) => {
                return AppEvent::DecodeFailed(DecodeError::BinaryFrame { len: data.len() });
            },
            Message::Close(frame) => {
                let reason = match frame {
                    Some(frame) if !frame.reason.is_empty() => {
                        format!("connection closed: {} ({})", frame.reason.as_str(), frame.code)
                    },
                    Some(frame) => format!("connection closed ({})", frame.code),
                    None => "connection closed".to_string(),
                };
                return AppEvent::ReadFailed { reason, closed: true };
            },
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {},
        }
    }
}

/// Serve reads: one [`read_next`] per permit, in order.
///
/// Ends when either channel closes.
pub async fn read_loop<F>(
    mut reader: Reader,
    mut permits: tokio::sync::mpsc::UnboundedReceiver<()>,
    mut deliver: F,
) where
    F: FnMut(AppEvent) -> bool,
{
    while permits.recv().await.is_some() {
        let event = read_next(&mut reader).await;
        if !deliver(event) {
            break;
        }
    }
    tracing::debug!("read loop finished");
}

/// Write the keepalive payload every `period`, first one `period` from now.
///
/// Returns the first write failure. Never returns otherwise.
pub async fn keepalive(writer: SharedWriter, period: Duration) -> TransportError {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    loop {
        ticker.tick().await;
        if let Err(e) = send_text(&writer, PING_PAYLOAD).await {
            return e;
        }
        tracing::trace!("keepalive sent");
    }
}

fn is_closed(error: &tungstenite::Error) -> bool {
    matches!(
        error,
        tungstenite::Error::ConnectionClosed
            | tungstenite::Error::AlreadyClosed
            | tungstenite::Error::Protocol(ProtocolError::ResetWithoutClosingHandshake)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_errors_are_terminal() {
        assert!(is_closed(&tungstenite::Error::ConnectionClosed));
        assert!(is_closed(&tungstenite::Error::AlreadyClosed));
        assert!(!is_closed(&tungstenite::Error::Io(std::io::Error::other("reset"))));
    }
}
