// src/color.rs

//! Defines the opaque `Rgb` color used for atlas pixels, colorkeys and
//! foreground overrides, plus the parsing rules for descriptor color values.
//!
//! Atlases are treated as opaque RGB images: transparency is expressed only
//! through a colorkey, so alpha never takes part in color comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named colors accepted in font descriptors and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    Gray,
}

impl NamedColor {
    /// Looks up a color name, ignoring ASCII case. `grey` is accepted as an alias.
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => NamedColor::Black,
            "white" => NamedColor::White,
            "red" => NamedColor::Red,
            "green" => NamedColor::Green,
            "blue" => NamedColor::Blue,
            "yellow" => NamedColor::Yellow,
            "magenta" => NamedColor::Magenta,
            "cyan" => NamedColor::Cyan,
            "gray" | "grey" => NamedColor::Gray,
            _ => return None,
        };
        Some(color)
    }

    /// Returns the `Rgb` value of this named color.
    pub fn to_rgb(self) -> Rgb {
        match self {
            NamedColor::Black => Rgb::new(0, 0, 0),
            NamedColor::White => Rgb::new(255, 255, 255),
            NamedColor::Red => Rgb::new(255, 0, 0),
            NamedColor::Green => Rgb::new(0, 255, 0),
            NamedColor::Blue => Rgb::new(0, 0, 255),
            NamedColor::Yellow => Rgb::new(255, 255, 0),
            NamedColor::Magenta => Rgb::new(255, 0, 255),
            NamedColor::Cyan => Rgb::new(0, 255, 255),
            NamedColor::Gray => Rgb::new(190, 190, 190),
        }
    }
}

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ColorValue", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from RGBA channels, dropping alpha.
    pub fn from_rgba(channels: [u8; 4]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }

    /// Returns the channels as RGBA with full opacity.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Parses `#RRGGBB`, `#RRGGBBAA` (alpha ignored), `0xRRGGBB` or a color name.
    pub fn parse(text: &str) -> Result<Self, String> {
        let trimmed = text.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"));

        if let Some(hex) = hex {
            if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(format!("'{}' is not a #RRGGBB or #RRGGBBAA color", text));
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            return match (channel(0), channel(2), channel(4)) {
                (Ok(r), Ok(g), Ok(b)) => Ok(Rgb::new(r, g, b)),
                _ => Err(format!("'{}' contains an invalid hex channel", text)),
            };
        }

        NamedColor::from_name(trimmed)
            .map(NamedColor::to_rgb)
            .ok_or_else(|| format!("unknown color '{}'", text))
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl From<NamedColor> for Rgb {
    fn from(named: NamedColor) -> Self {
        named.to_rgb()
    }
}

/// Raw shapes a color may take in a descriptor: a string or a channel list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Text(String),
    Channels(Vec<i64>),
}

impl TryFrom<ColorValue> for Rgb {
    type Error = String;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Text(text) => Rgb::parse(&text),
            ColorValue::Channels(channels) => {
                if !(channels.len() == 3 || channels.len() == 4) {
                    return Err(format!(
                        "expected 3 or 4 channels, found {}",
                        channels.len()
                    ));
                }
                let mut rgb = [0u8; 3];
                for (slot, &value) in rgb.iter_mut().zip(channels.iter()) {
                    *slot = u8::try_from(value)
                        .map_err(|_| format!("channel value {} is outside 0..=255", value))?;
                }
                Ok(Rgb::new(rgb[0], rgb[1], rgb[2]))
            }
        }
    }
}
