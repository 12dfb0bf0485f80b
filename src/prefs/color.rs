use std::fmt;
use std::fmt::Formatter;

use serde::{Deserialize, Serialize};

/// A color with four channels, each nominally in `0.0..=1.0`.
/// Out-of-range channels are carried as-is, nothing here clamps them.
///
/// The field names double as the stored field names, so renaming one
/// changes the persisted format.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64, opacity: f64) -> Self {
        Self {
            red,
            green,
            blue,
            opacity,
        }
    }

    /// Parses a `#RRGGBB` style hex string into a fully opaque color.
    ///
    /// A string that can't be parsed yields **pure black** instead of an
    /// error. Callers use this as a safe default, so don't change it.
    pub fn from_hex(hex: &str) -> Self {
        Self::from_hex_with_opacity(hex, 1.0)
    }

    /// Same as [`Color::from_hex`], with the opacity supplied by the caller.
    /// Malformed input yields black at the requested opacity.
    pub fn from_hex_with_opacity(hex: &str, opacity: f64) -> Self {
        let digits = match hex.trim().strip_prefix('#') {
            Some(stripped) => stripped,
            None => hex.trim(),
        };

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self::new(0.0, 0.0, 0.0, opacity);
        }

        // Six hex digits always fit in 24 bits.
        let value = u32::from_str_radix(digits, 16).unwrap_or(0);

        Self::new(
            ((value >> 16) & 0xFF) as f64 / 255.0,
            ((value >> 8) & 0xFF) as f64 / 255.0,
            (value & 0xFF) as f64 / 255.0,
            opacity,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            channel_to_byte(self.red),
            channel_to_byte(self.green),
            channel_to_byte(self.blue)
        )
    }
}

fn channel_to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
