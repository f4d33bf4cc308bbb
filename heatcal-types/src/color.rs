//! Colours used for cell fills.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::HeatcalError;

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white, the low end of every fill scale.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    /// Default accent (`#ff4500`).
    pub const ORANGE_RED: Self = Self::new(0xff, 0x45, 0x00);

    /// Construct from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear interpolation; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let ch = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            // clamped above, so the cast cannot truncate
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let out = v.round().clamp(0.0, 255.0) as u8;
            out
        };
        Self::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::ORANGE_RED
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = HeatcalError;

    /// Accepts `#rgb`, `#rrggbb` and `rgb(r, g, b)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let bad = || HeatcalError::InvalidColor(raw.to_string());

        if let Some(hex) = raw.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(bad());
            }
            let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| bad());
            return match hex.len() {
                3 => {
                    let mut out = [0u8; 3];
                    for (i, c) in hex.chars().enumerate() {
                        let doubled: String = [c, c].iter().collect();
                        out[i] = channel(&doubled)?;
                    }
                    Ok(Self::new(out[0], out[1], out[2]))
                }
                6 => Ok(Self::new(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )),
                _ => Err(bad()),
            };
        }

        if let Some(body) = raw
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(bad());
            }
            let mut out = [0u8; 3];
            for (i, p) in parts.iter().enumerate() {
                out[i] = p.parse::<u8>().map_err(|_| bad())?;
            }
            return Ok(Self::new(out[0], out[1], out[2]));
        }

        Err(bad())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Fill of a drawn cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    /// Nothing painted; the cell still exists for hit-testing.
    Transparent,
    /// Painted with a colour.
    Solid(Rgb),
}
