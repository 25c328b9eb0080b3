use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// An RGB color as the device expects it: a three element array `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::new(0, 0, 255)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.red, self.green, self.blue).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (red, green, blue) = <(u8, u8, u8)>::deserialize(deserializer)?;
        Ok(Color { red, green, blue })
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(tuple: (u8, u8, u8)) -> Self {
        Color::new(tuple.0, tuple.1, tuple.2)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(color: Color) -> Self {
        (color.red, color.green, color.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.red, self.green, self.blue)
    }
}

/// A pixel coordinate on the matrix, serialized as `[x, y]`.
///
/// Coordinates are not checked against the display size; negative or
/// off-screen values are sent as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.x, self.y).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y) = <(i32, i32)>::deserialize(deserializer)?;
        Ok(Position { x, y })
    }
}

impl From<(i32, i32)> for Position {
    fn from(tuple: (i32, i32)) -> Self {
        Position::new(tuple.0, tuple.1)
    }
}

/// Error returned when a color or position cannot be parsed from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} '{input}'")]
pub struct ParseValueError {
    kind: &'static str,
    input: String,
}

impl ParseValueError {
    fn new(kind: &'static str, input: &str) -> Self {
        ParseValueError {
            kind,
            input: input.to_string(),
        }
    }
}

/// Accepts either `r,g,b` or one of the [`NamedColor`] names.
impl FromStr for Color {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(',') {
            let parts = s
                .split(',')
                .map(|part| part.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| ParseValueError::new("color", s))?;
            match parts.as_slice() {
                [r, g, b] => Ok(Color::new(*r, *g, *b)),
                _ => Err(ParseValueError::new("color", s)),
            }
        } else {
            <NamedColor as ValueEnum>::from_str(s, true)
                .map(Into::into)
                .map_err(|_| ParseValueError::new("color", s))
        }
    }
}

/// Accepts `x,y`.
impl FromStr for Position {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| ParseValueError::new("position", s))?;
        let x = x
            .trim()
            .parse()
            .map_err(|_| ParseValueError::new("position", s))?;
        let y = y
            .trim()
            .parse()
            .map_err(|_| ParseValueError::new("position", s))?;
        Ok(Position::new(x, y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamedColor {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Cyan,
    Magenta,
    Lime,
    Pink,
    Teal,
    Lavender,
    Brown,
    Beige,
    Maroon,
    Mint,
    White,
    Black,
}

impl From<NamedColor> for Color {
    fn from(color: NamedColor) -> Self {
        match color {
            NamedColor::Red => Color::new(255, 0, 0),
            NamedColor::Green => Color::new(0, 255, 0),
            NamedColor::Blue => Color::new(0, 0, 255),
            NamedColor::Yellow => Color::new(255, 255, 0),
            NamedColor::Orange => Color::new(255, 165, 0),
            NamedColor::Purple => Color::new(128, 0, 128),
            NamedColor::Cyan => Color::new(0, 255, 255),
            NamedColor::Magenta => Color::new(255, 0, 255),
            NamedColor::Lime => Color::new(50, 205, 50),
            NamedColor::Pink => Color::new(255, 192, 203),
            NamedColor::Teal => Color::new(0, 128, 128),
            NamedColor::Lavender => Color::new(230, 230, 250),
            NamedColor::Brown => Color::new(165, 42, 42),
            NamedColor::Beige => Color::new(245, 245, 220),
            NamedColor::Maroon => Color::new(128, 0, 0),
            NamedColor::Mint => Color::new(189, 252, 201),
            NamedColor::White => Color::new(255, 255, 255),
            NamedColor::Black => Color::new(0, 0, 0),
        }
    }
}
