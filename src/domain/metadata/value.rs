// SPDX-License-Identifier: MPL-2.0
//! Typed tag values produced by validation and understood by the serializer.

use super::coordinate::CoordinateRational;
use std::fmt;

/// The binary representation of an editable tag's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagValue {
    /// Integer field such as an image dimension.
    Integer(i64),
    /// ASCII text, without the trailing NUL.
    Text(Vec<u8>),
    /// Single-character hemisphere reference (`N`, `S`, `E`, `W`).
    Reference(u8),
    /// Degree/minute/second coordinate.
    Coordinate(CoordinateRational),
}

impl TagValue {
    /// Text values as a string, lossily decoded.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            TagValue::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            TagValue::Reference(byte) => Some(char::from(*byte).to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_coordinate(&self) -> Option<&CoordinateRational> {
        match self {
            TagValue::Coordinate(coordinate) => Some(coordinate),
            _ => None,
        }
    }

    /// Reference byte, also accepted from a one-character text value.
    #[must_use]
    pub fn as_reference(&self) -> Option<u8> {
        match self {
            TagValue::Reference(byte) => Some(*byte),
            TagValue::Text(bytes) if bytes.len() == 1 => Some(bytes[0]),
            _ => None,
        }
    }
}

/// Raw rendering, used when a tag has no display decoder.
impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Integer(value) => write!(f, "{value}"),
            TagValue::Text(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            TagValue::Reference(byte) => write!(f, "{}", char::from(*byte)),
            TagValue::Coordinate(c) => {
                write!(f, "{}, {}, {}", c.degrees, c.minutes, c.seconds)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::Rational;

    #[test]
    fn display_renders_raw_values() {
        assert_eq!(TagValue::Integer(640).to_string(), "640");
        assert_eq!(TagValue::Text(b"Canon".to_vec()).to_string(), "Canon");
        assert_eq!(TagValue::Reference(b'N').to_string(), "N");

        let c = CoordinateRational::new(
            Rational::whole(48),
            Rational::whole(51),
            Rational::new(594, 25).unwrap(),
        );
        assert_eq!(TagValue::Coordinate(c).to_string(), "48/1, 51/1, 594/25");
    }

    #[test]
    fn as_reference_accepts_single_character_text() {
        assert_eq!(TagValue::Reference(b'S').as_reference(), Some(b'S'));
        assert_eq!(TagValue::Text(b"W".to_vec()).as_reference(), Some(b'W'));
        assert_eq!(TagValue::Text(b"WE".to_vec()).as_reference(), None);
        assert_eq!(TagValue::Integer(1).as_reference(), None);
    }
}
