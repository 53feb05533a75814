use crate::core::protocol::{Command, Rgb};
use serde::{Deserialize, Serialize};

/// Client-side shadow of the controller state.
///
/// Not authoritative — the peripheral holds the real state. The shadow is
/// mutated only by validated user actions, and every mutation yields the
/// wire command that re-synchronizes the peripheral. Because the link is
/// fire-and-forget, the shadow is also what gets replayed in full after
/// every (re)connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedState {
    /// Strip color
    pub color: Rgb,
    /// Global brightness, independent of the color channels
    pub brightness: u8,
    /// Index into the fixed effect table
    pub effect: usize,
    /// Strip power state
    pub enabled: bool,
}

impl Default for LedState {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            brightness: 128,
            effect: 0,
            enabled: true,
        }
    }
}

impl LedState {
    /// Set the color; the emitted command carries the current brightness
    /// as its fourth field.
    pub fn set_color(&mut self, color: Rgb) -> Command {
        self.color = color;
        self.color_command()
    }

    /// Set the brightness. Subsequent color commands pick up the new
    /// value.
    pub fn set_brightness(&mut self, brightness: u8) -> Command {
        self.brightness = brightness;
        Command::Brightness(brightness)
    }

    /// Select an effect by index. Re-selecting the current effect still
    /// yields a command; transmission is never suppressed.
    pub fn select_effect(&mut self, effect: usize) -> Command {
        self.effect = effect;
        Command::Effect(effect)
    }

    /// Flip the power state and report the new one.
    pub fn toggle_power(&mut self) -> Command {
        self.enabled = !self.enabled;
        Command::Power(self.enabled)
    }

    /// Set the power state explicitly.
    pub fn set_power(&mut self, enabled: bool) -> Command {
        self.enabled = enabled;
        Command::Power(enabled)
    }

    /// The color command for the current shadow state
    pub fn color_command(&self) -> Command {
        Command::Color {
            color: self.color,
            brightness: self.brightness,
        }
    }

    /// Full-state replay sequence: color, brightness, effect, power.
    ///
    /// Sent after every successful connect so the peripheral matches the
    /// shadow regardless of what changed while disconnected.
    pub fn replay_commands(&self) -> [Command; 4] {
        [
            self.color_command(),
            Command::Brightness(self.brightness),
            Command::Effect(self.effect),
            Command::Power(self.enabled),
        ]
    }
}
