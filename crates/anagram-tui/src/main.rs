//! Anagram TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Join the default room
//! anagram-tui
//!
//! # Join another server, with logs in $TMPDIR/anagram-tui.log
//! RUST_LOG=debug anagram-tui ws://localhost:3000/ws/anagram/1
//! ```

use std::{fs::OpenOptions, io, sync::Mutex};

use anagram_tui::{ClientConfig, Runtime, TerminalDriver, Theme};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "anagram-tui.log";

/// Anagram game terminal client
#[derive(Parser, Debug)]
#[command(name = "anagram-tui")]
#[command(about = "Terminal client for the anagram game")]
#[command(version)]
struct Args {
    /// WebSocket URL of the game room
    #[arg(default_value = anagram_app::DEFAULT_SERVER_URL)]
    url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging()?;

    // A provider may already be installed; either way one is.
    let _ = rustls::crypto::ring::default_provider().install_default();

    tracing::info!(url = %args.url, "anagram client starting");

    let driver = TerminalDriver::new(Theme::default())?;
    Runtime::new(driver, ClientConfig::with_server_url(args.url)).run().await?;

    Ok(())
}

/// Log to a file in the temp dir, and only when `RUST_LOG` is set. The
/// terminal is in raw mode on the alternate screen for the whole session.
fn init_logging() -> io::Result<()> {
    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return Ok(());
    };

    let path = std::env::temp_dir().join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}
