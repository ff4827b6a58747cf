//! sRGB colors and the sentiment gradient used for percentages.
//!
//! The legend, the widget and the CLI all color a percentage in [-100, 100]
//! through [`PercentColorMapper`], a three-stop linear gradient
//! red (-100) -> yellow (0) -> green (+100).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8-bit channels.
///
/// Serialized as a `#RRGGBB` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Per-channel linear blend between `self` (t = 0) and `other` (t = 1).
    ///
    /// Channels are treated as reals and rounded to the nearest integer.
    /// `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// ANSI 24-bit foreground escape for terminal output.
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color '{s}': expected #RRGGBB"));
        }
        let packed = u32::from_str_radix(hex, 16).map_err(|e| format!("invalid color '{s}': {e}"))?;
        Ok(Rgb::from_hex(packed))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Red anchor, reached at -100%.
pub const NEGATIVE: Rgb = Rgb::from_hex(0xFF3B30);
/// Yellow anchor, reached at 0%.
pub const NEUTRAL: Rgb = Rgb::from_hex(0xFFCC00);
/// Green anchor, reached at +100%.
pub const POSITIVE: Rgb = Rgb::from_hex(0x34C759);

/// Maps a percentage to a color on the red -> yellow -> green gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentColorMapper {
    pub negative: Rgb,
    pub neutral: Rgb,
    pub positive: Rgb,
}

impl Default for PercentColorMapper {
    fn default() -> Self {
        Self {
            negative: NEGATIVE,
            neutral: NEUTRAL,
            positive: POSITIVE,
        }
    }
}

impl PercentColorMapper {
    pub fn new(negative: Rgb, neutral: Rgb, positive: Rgb) -> Self {
        Self {
            negative,
            neutral,
            positive,
        }
    }

    /// Color for `percent`. Out-of-range input is clamped to [-100, 100];
    /// NaN is treated as 0.
    pub fn color_for(&self, percent: f64) -> Rgb {
        let clamped = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(-100.0, 100.0)
        };

        if clamped <= 0.0 {
            let t = (clamped + 100.0) / 100.0;
            self.negative.lerp(self.neutral, t)
        } else {
            let t = clamped / 100.0;
            self.neutral.lerp(self.positive, t)
        }
    }
}

/// [`PercentColorMapper::color_for`] with the default anchors.
pub fn color_for(percent: f64) -> Rgb {
    PercentColorMapper::default().color_for(percent)
}
