use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use cubetimer_notation::Face;
use serde::de::Error;
use serde::{Deserialize, Serialize};

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
        let rgb = color_from_hex_str(s)?;
        Ok(Rgb { rgb })
    }
}
impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for Rgb {
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
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    /// Pure white
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    /// Constructs a color from sRGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }
}

/// Deserializes a color from a hex string like `#ff00ff` or `#f0f`.
fn color_from_hex_str(s: &str) -> Result<[u8; 3], hex::FromHexError> {
    let mut rgb = [0_u8; 3];
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    match s.len() {
        3 => {
            let s = &s.chars().flat_map(|c| [c, c]).collect::<String>();
            hex::decode_to_slice(s, &mut rgb)?;
        }
        _ => hex::decode_to_slice(s, &mut rgb)?,
    }
    Ok(rgb)
}

/// Sticker color for each face of a solved cube.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct FacePalette {
    /// Color of the right face.
    pub right: Rgb,
    /// Color of the left face.
    pub left: Rgb,
    /// Color of the up face.
    pub up: Rgb,
    /// Color of the down face.
    pub down: Rgb,
    /// Color of the front face.
    pub front: Rgb,
    /// Color of the back face.
    pub back: Rgb,
}
impl Default for FacePalette {
    fn default() -> Self {
        Self {
            right: Rgb::new(0xff, 0x00, 0x00),
            left: Rgb::new(0xff, 0x8c, 0x00),
            up: Rgb::WHITE,
            down: Rgb::new(0xff, 0xff, 0x00),
            front: Rgb::new(0x00, 0x80, 0x00),
            back: Rgb::new(0x00, 0x00, 0xff),
        }
    }
}
impl Index<Face> for FacePalette {
    type Output = Rgb;

    fn index(&self, face: Face) -> &Self::Output {
        match face {
            Face::R => &self.right,
            Face::L => &self.left,
            Face::U => &self.up,
            Face::D => &self.down,
            Face::F => &self.front,
            Face::B => &self.back,
        }
    }
}
impl IndexMut<Face> for FacePalette {
    fn index_mut(&mut self, face: Face) -> &mut Self::Output {
        match face {
            Face::R => &mut self.right,
            Face::L => &mut self.left,
            Face::U => &mut self.up,
            Face::D => &mut self.down,
            Face::F => &mut self.front,
            Face::B => &mut self.back,
        }
    }
}
impl FacePalette {
    /// Returns the colors in [`Face::ALL`] order.
    pub fn to_array(&self) -> [Rgb; 6] {
        Face::ALL.map(|face| self[face])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rgb_hex() {
        assert_eq!("#ff8c00".parse(), Ok(Rgb::new(0xff, 0x8c, 0x00)));
        assert_eq!("f0a".parse(), Ok(Rgb::new(0xff, 0x00, 0xaa)));
        assert_eq!(Rgb::new(0, 0x80, 0).to_string(), "#008000");
        "#12345".parse::<Rgb>().expect_err("wrong length");
        "#gggggg".parse::<Rgb>().expect_err("not hex");
    }

    #[test]
    fn test_palette_serde() {
        let palette = FacePalette::default();
        let json = serde_json::to_string(&palette).unwrap();
        assert!(json.contains("\"front\":\"#008000\""));
        assert_eq!(serde_json::from_str::<FacePalette>(&json).unwrap(), palette);

        // missing faces fall back to defaults
        let partial: FacePalette = serde_json::from_str(r##"{"up":"#000"}"##).unwrap();
        assert_eq!(partial[Face::U], Rgb::BLACK);
        assert_eq!(partial[Face::D], palette.down);
    }
}
