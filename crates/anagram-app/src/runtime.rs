//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: session state machine
//! - [`Driver`]: Platform-specific I/O

use crate::{App, AppAction, ClientConfig, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver and configuration.
    pub fn new(driver: D, config: ClientConfig) -> Self {
        Self { driver, app: App::new(config) }
    }

    /// Run the main event loop until the user quits or events run out.
    ///
    /// Each event is stamped with the driver's clock, handed to the App, and
    /// the resulting actions are executed in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<App, D::Error> {
        self.driver.render(&self.app)?;

        let actions = self.app.connect();
        let mut quit = self.execute(actions)?;

        while !quit {
            let Some(event) = self.driver.next_event().await? else {
                tracing::debug!("event source exhausted");
                break;
            };

            let now = self.driver.now();
            let actions = self.app.handle(event, now);
            quit = self.execute(actions)?;
        }

        self.driver.stop();
        Ok(self.app)
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if should quit. Actions after `Quit` are dropped.
    fn execute(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::Connect { server_url } => self.driver.connect(&server_url),
                AppAction::ReadNext => self.driver.request_read(),
                AppAction::StartKeepalive { interval } => self.driver.start_keepalive(interval),
                AppAction::Send { text } => self.driver.send(text),
                AppAction::StartCountdown { id, interval } => {
                    self.driver.start_countdown(id, interval);
                },
                AppAction::StopCountdown => self.driver.stop_countdown(),
            }
        }
        Ok(false)
    }
}
