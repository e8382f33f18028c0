//! Client configuration.

use std::time::Duration;

/// Endpoint used when no URL is given on the command line.
pub const DEFAULT_SERVER_URL: &str = "wss://mc.chenk.my.id:3000/ws/anagram/1";

/// Interval between keepalive pings while connected.
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(10);

/// Resolution of the round countdown.
pub const DEFAULT_COUNTDOWN_INTERVAL: Duration = Duration::from_millis(100);

/// Number of chat lines kept; older lines are evicted first.
pub const DEFAULT_CHAT_CAPACITY: usize = 12;

/// Session configuration.
///
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket URL of the game room.
    pub server_url: String,
    /// Keepalive period.
    pub keepalive_interval: Duration,
    /// Countdown tick period.
    pub countdown_interval: Duration,
    /// Chat log capacity.
    pub chat_capacity: usize,
}

impl ClientConfig {
    /// Default configuration pointed at `server_url`.
    pub fn with_server_url(server_url: impl Into<String>) -> Self {
        Self { server_url: server_url.into(), ..Self::default() }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            keepalive_interval: DEFAULT_KEEPALIVE_INTERVAL,
            countdown_interval: DEFAULT_COUNTDOWN_INTERVAL,
            chat_capacity: DEFAULT_CHAT_CAPACITY,
        }
    }
}
