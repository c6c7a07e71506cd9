//! 24-bit RGB colours.
//!
//! The bars file spells colours as `#RRGGBB`.  Anything that does not match
//! that exact shape (seven characters, leading `#`, six hex digits) is
//! rejected with a [`ColorError`]; callers substitute [`Rgb::BLACK`].

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when converting a `#RRGGBB` string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not exactly seven characters long.
    #[error("invalid colour {0:?}: expected 7 characters in the form #RRGGBB")]
    InvalidLength(String),

    /// The string does not start with `#`.
    #[error("invalid colour {0:?}: missing leading '#'")]
    MissingHash(String),

    /// One of the six channel characters is not a hex digit.
    #[error("invalid colour {0:?}: channels must be hexadecimal digits")]
    InvalidHex(String),
}

/// A 24-bit RGB colour with 8 bits per channel.  No alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Fallback colour for missing or malformed colour strings.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Background colour of the unfilled part of a track.
    pub const TRACK: Rgb = Rgb::new(240, 240, 240);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` string.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] if the input is not exactly `#` followed by six
    /// hex digits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bars_core::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#112233").unwrap(), Rgb::new(0x11, 0x22, 0x33));
    /// assert!(Rgb::from_hex("#ZZZZZZ").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        // Length is checked in characters so multi-byte input cannot slice
        // through a UTF-8 boundary below.
        if hex.chars().count() != 7 {
            return Err(ColorError::InvalidLength(hex.to_string()));
        }
        let Some(digits) = hex.strip_prefix('#') else {
            return Err(ColorError::MissingHash(hex.to_string()));
        };
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Packs the colour as a Win32 `COLORREF` (`0x00BBGGRR`).
    pub fn to_colorref(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
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
        Rgb::from_hex(&s).map_err(de::Error::custom)
    }
}
