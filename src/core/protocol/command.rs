use serde::{Deserialize, Serialize};

/// Fixed effect table understood by the controller firmware.
///
/// The wire command carries only the index; the names exist for display
/// and command-line lookup.
pub const EFFECTS: &[&str] = &["static", "rainbow", "fade", "music"];

/// RGB color with one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert normalized [0.0, 1.0] channels to bytes.
    ///
    /// Channels are scaled by 255 and truncated; inputs are clamped to the
    /// unit range first so out-of-range floats cannot wrap.
    pub fn from_normalized(r: f32, g: f32, b: f32) -> Self {
        fn channel(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0) as u8
        }

        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}

/// A single wire command for the LED controller.
///
/// Each command encodes to one short ASCII line with no terminator and no
/// framing; the firmware parses the leading tag character and the
/// comma-separated decimal fields after it. One write carries exactly one
/// command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Set the strip color; carries the current brightness as fourth field
    Color { color: Rgb, brightness: u8 },
    /// Set the global brightness
    Brightness(u8),
    /// Select an effect by its index in [`EFFECTS`]
    Effect(usize),
    /// Power the strip on or off
    Power(bool),
}

impl Command {
    /// Encode to the exact wire representation
    pub fn encode(&self) -> String {
        match self {
            Command::Color { color, brightness } => {
                format!("C{},{},{},{}", color.r, color.g, color.b, brightness)
            }
            Command::Brightness(value) => format!("B{}", value),
            Command::Effect(index) => format!("E{}", index),
            Command::Power(enabled) => format!("T{}", if *enabled { 1 } else { 0 }),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Resolve an effect given either its index or its name.
///
/// Returns `None` for unknown names and out-of-range indexes.
pub fn effect_index(input: &str) -> Option<usize> {
    if let Ok(index) = input.parse::<usize>() {
        return (index < EFFECTS.len()).then_some(index);
    }

    EFFECTS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_color_encoding() {
        let command = Command::Color {
            color: Rgb::new(10, 20, 30),
            brightness: 200,
        };
        assert_eq!(command.encode(), "C10,20,30,200");
    }

    #[test]
    fn test_brightness_encoding() {
        assert_eq!(Command::Brightness(0).encode(), "B0");
        assert_eq!(Command::Brightness(128).encode(), "B128");
        assert_eq!(Command::Brightness(255).encode(), "B255");
    }

    #[test]
    fn test_effect_encoding() {
        assert_eq!(Command::Effect(0).encode(), "E0");
        assert_eq!(Command::Effect(3).encode(), "E3");
    }

    #[test]
    fn test_power_encoding() {
        assert_eq!(Command::Power(true).encode(), "T1");
        assert_eq!(Command::Power(false).encode(), "T0");
    }

    #[test]
    fn test_display_matches_encode() {
        let command = Command::Color {
            color: Rgb::WHITE,
            brightness: 128,
        };
        assert_eq!(command.to_string(), command.encode());
    }

    #[test]
    fn test_normalized_color_truncates() {
        // 0.5 * 255 = 127.5, truncated to 127
        let color = Rgb::from_normalized(0.5, 0.0, 1.0);
        assert_eq!(color, Rgb::new(127, 0, 255));
    }

    #[test]
    fn test_normalized_color_clamps() {
        let color = Rgb::from_normalized(-0.5, 1.5, 0.25);
        assert_eq!(color, Rgb::new(0, 255, 63));
    }

    #[test]
    fn test_effect_lookup_by_index() {
        assert_eq!(effect_index("0"), Some(0));
        assert_eq!(effect_index("3"), Some(3));
        assert_eq!(effect_index("4"), None);
    }

    #[test]
    fn test_effect_lookup_by_name() {
        assert_eq!(effect_index("rainbow"), Some(1));
        assert_eq!(effect_index("MUSIC"), Some(3));
        assert_eq!(effect_index("strobe"), None);
    }

    proptest! {
        #[test]
        fn prop_color_encoding_exact(r: u8, g: u8, b: u8, brightness: u8) {
            let encoded = Command::Color {
                color: Rgb::new(r, g, b),
                brightness,
            }
            .encode();

            prop_assert_eq!(encoded, format!("C{},{},{},{}", r, g, b, brightness));
        }

        #[test]
        fn prop_encoding_is_bare_ascii(v: u8) {
            for command in [Command::Brightness(v), Command::Power(v % 2 == 0)] {
                let encoded = command.encode();
                prop_assert!(encoded.is_ascii());
                prop_assert!(!encoded.contains(char::is_whitespace));
                prop_assert!(!encoded.ends_with('\n'));
            }
        }
    }
}
