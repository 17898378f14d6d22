use std::fmt;
use std::str::FromStr;

use serde::de::Error;
use strum::IntoEnumIterator;

use crate::{CodecError, Face};

/// Sticker color.
///
/// Each color is written as a single lowercase letter, which is the format
/// used by face matrices and by the scan collaborator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Color {
    /// White (`w`).
    White,
    /// Yellow (`y`).
    Yellow,
    /// Red (`r`).
    Red,
    /// Orange (`o`).
    Orange,
    /// Green (`g`).
    Green,
    /// Blue (`b`).
    Blue,
    /// Unknown or interior color (`u`).
    Unknown,
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
impl TryFrom<char> for Color {
    type Error = CodecError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_code(c).ok_or(CodecError::UnknownColorCode(c))
    }
}
impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_char(self.code())
    }
}
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let c = char::deserialize(deserializer)?;
        Color::try_from(c).map_err(D::Error::custom)
    }
}
impl Color {
    /// Returns the single-letter code for the color.
    pub const fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Yellow => 'y',
            Color::Red => 'r',
            Color::Orange => 'o',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::Unknown => 'u',
        }
    }
    /// Parses a single-letter color code, case-insensitively.
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Color::White),
            'y' => Some(Color::Yellow),
            'r' => Some(Color::Red),
            'o' => Some(Color::Orange),
            'g' => Some(Color::Green),
            'b' => Some(Color::Blue),
            'u' => Some(Color::Unknown),
            _ => None,
        }
    }

    /// Returns the face that has this color when the puzzle is solved, or
    /// `None` for [`Color::Unknown`].
    pub fn home_face(self) -> Option<Face> {
        Face::iter().find(|face| face.scheme_color() == self)
    }

    /// Returns the display color.
    pub const fn rgb(self) -> Rgb {
        let rgb = match self {
            Color::White => [255, 255, 255],
            Color::Yellow => [255, 255, 0],
            Color::Red => [255, 0, 0],
            Color::Orange => [255, 128, 0],
            Color::Green => [0, 255, 0],
            Color::Blue => [0, 0, 255],
            Color::Unknown => [0, 0, 0],
        };
        Rgb { rgb }
    }
}

/// 8-bit sRGB color that serializes to a string like `"#ff00ff"`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// sRGB component values.
    pub rgb: [u8; 3],
}
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode(self.rgb))
    }
}
impl FromStr for Rgb {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rgb = [0_u8; 3];
        let s = s.strip_prefix('#').unwrap_or(s).trim();
        match s.len() {
            3 => {
                let s = &s.chars().flat_map(|c| [c, c]).collect::<String>();
                hex::decode_to_slice(s, &mut rgb)?;
            }
            _ => hex::decode_to_slice(s, &mut rgb)?,
        }
        Ok(Rgb { rgb })
    }
}
impl serde::Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Self>().map_err(D::Error::custom)
    }
}
impl Rgb {
    /// Pure black
    pub const BLACK: Rgb = Rgb { rgb: [0; 3] };
    /// Pure white
    pub const WHITE: Rgb = Rgb { rgb: [255; 3] };

    /// Returns the components scaled to the range 0.0 to 1.0.
    pub fn to_f32_array(self) -> [f32; 3] {
        self.rgb.map(|c| c as f32 / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_color_codes() {
        for color in Color::iter() {
            assert_eq!(Some(color), Color::from_code(color.code()));
        }
        assert_eq!(Some(Color::Green), Color::from_code('G'));
        assert_eq!(
            Err(CodecError::UnknownColorCode('x')),
            Color::try_from('x'),
        );
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!("#ff8000", Color::Orange.rgb().to_string());
        assert_eq!(Ok(Rgb { rgb: [255, 0, 255] }), "#f0f".parse());
        assert_eq!(Ok(Rgb::WHITE), "ffffff".parse());
        assert!("#12345".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_home_faces() {
        assert_eq!(Some(Face::U), Color::Yellow.home_face());
        assert_eq!(Some(Face::D), Color::White.home_face());
        assert_eq!(None, Color::Unknown.home_face());
    }
}
