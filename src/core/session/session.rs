use crate::core::connector::Connector;
use crate::core::protocol::{Command, Rgb};
use crate::core::session::state::LedState;
use crate::domain::error::LedComResult;
use tracing::{debug, info, warn};

/// Owns the live connection and the command write path.
///
/// Every user action mutates the [`LedState`] shadow and immediately
/// attempts to emit the corresponding wire command. A write failure tears
/// the connection down completely and surfaces as a `false` return — the
/// broken link is detected lazily on the next write, never proactively.
/// Reconnecting is an explicit caller decision.
pub struct CommandSession {
    connector: Connector,
    state: LedState,
}

impl CommandSession {
    /// Create a session with the default shadow state
    pub fn new(connector: Connector) -> Self {
        Self::with_state(connector, LedState::default())
    }

    /// Create a session resuming a previously known shadow state
    pub fn with_state(connector: Connector, state: LedState) -> Self {
        Self { connector, state }
    }

    /// Connect to a bonded peripheral and replay the full shadow state.
    ///
    /// The replay runs once per successful connect, in fixed order, so the
    /// peripheral re-syncs to the last-known intent regardless of what
    /// changed while disconnected.
    pub async fn connect(&mut self, address: &str) -> LedComResult<()> {
        self.connector.connect(address).await?;
        self.on_connected().await;
        Ok(())
    }

    /// Tear down the connection. Idempotent.
    pub async fn disconnect(&mut self) {
        self.connector.disconnect().await;
    }

    /// Last known connection state
    pub fn is_connected(&self) -> bool {
        self.connector.is_connected()
    }

    /// Current shadow state
    pub fn state(&self) -> &LedState {
        &self.state
    }

    /// Consume the session, yielding the shadow state for persistence
    pub fn into_state(self) -> LedState {
        self.state
    }

    /// Send a raw command line.
    ///
    /// Returns `false` without touching the transport when disconnected.
    /// On an I/O failure the cause is logged, the connection is fully torn
    /// down and `false` is returned; the command is not retried.
    pub async fn send_command(&mut self, raw: &str) -> bool {
        if !self.connector.is_connected() {
            debug!("Dropping command '{}': not connected", raw);
            return false;
        }

        match self.connector.write(raw).await {
            Ok(()) => {
                debug!("Sent command '{}'", raw);
                true
            }
            Err(e) => {
                warn!("Write failed, disconnecting: {}", e);
                self.connector.disconnect().await;
                false
            }
        }
    }

    /// Set the strip color from byte channels
    pub async fn set_color(&mut self, r: u8, g: u8, b: u8) -> bool {
        let command = self.state.set_color(Rgb::new(r, g, b));
        self.send(command).await
    }

    /// Set the strip color from normalized [0.0, 1.0] channels
    pub async fn set_color_normalized(&mut self, r: f32, g: f32, b: f32) -> bool {
        let command = self.state.set_color(Rgb::from_normalized(r, g, b));
        self.send(command).await
    }

    /// Set the global brightness
    pub async fn set_brightness(&mut self, brightness: u8) -> bool {
        let command = self.state.set_brightness(brightness);
        self.send(command).await
    }

    /// Select an effect by its index in the fixed effect table
    pub async fn select_effect(&mut self, effect: usize) -> bool {
        let command = self.state.select_effect(effect);
        self.send(command).await
    }

    /// Flip the power state
    pub async fn toggle_power(&mut self) -> bool {
        let command = self.state.toggle_power();
        self.send(command).await
    }

    /// Set the power state explicitly
    pub async fn set_power(&mut self, enabled: bool) -> bool {
        let command = self.state.set_power(enabled);
        self.send(command).await
    }

    // Private methods

    async fn send(&mut self, command: Command) -> bool {
        self.send_command(&command.encode()).await
    }

    async fn on_connected(&mut self) {
        info!("Replaying shadow state to peripheral");
        for command in self.state.replay_commands() {
            if !self.send(command).await {
                warn!("State replay aborted: connection lost");
                break;
            }
        }
    }
}

impl std::fmt::Debug for CommandSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSession")
            .field("connected", &self.is_connected())
            .field("state", &self.state)
            .finish()
    }
}
