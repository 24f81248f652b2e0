//! Color and region primitives
//!
//! Provides the integer RGB triple the pipeline works with, its interop with
//! `palette`, hex rendering, and the pixel rectangles that locate indicator
//! patches on a photographed kit.

use std::fmt;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Result};

/// RGB color with integer channels in [0, 255]
///
/// Produced by aggregating a region of pixels, never by reading a single pixel.
/// Serializes as a 3-element sequence `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels in R, G, B order
    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Hexadecimal color string (e.g., "#FF0000")
    pub fn to_hex(&self) -> String {
        format!("#{:X}", Srgb::<u8>::from(*self))
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.channels()
    }
}

impl From<Color> for Srgb<u8> {
    fn from(color: Color) -> Self {
        Srgb::new(color.red, color.green, color.blue)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(srgb: Srgb<u8>) -> Self {
        Self::new(srgb.red, srgb.green, srgb.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// Axis-aligned pixel rectangle `(x1, y1)`-`(x2, y2)`, end-exclusive
///
/// Invariant: `x1 < x2` and `y1 < y2`. Whether it fits a given image is
/// checked at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 4]", into = "[u32; 4]")]
pub struct Region {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

impl Region {
    /// Create a region, rejecting empty or inverted rectangles
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Result<Self> {
        if x1 >= x2 || y1 >= y2 {
            return Err(AnalysisError::InvalidParameter {
                parameter: "region".into(),
                value: format!("[{}, {}, {}, {}]", x1, y1, x2, y2),
            });
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn x1(&self) -> u32 {
        self.x1
    }

    pub fn y1(&self) -> u32 {
        self.y1
    }

    pub fn x2(&self) -> u32 {
        self.x2
    }

    pub fn y2(&self) -> u32 {
        self.y2
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Number of pixels covered
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Whether the whole rectangle lies inside a `width` x `height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x2 <= width && self.y2 <= height
    }
}

impl TryFrom<[u32; 4]> for Region {
    type Error = AnalysisError;

    fn try_from([x1, y1, x2, y2]: [u32; 4]) -> Result<Self> {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<Region> for [u32; 4] {
    fn from(region: Region) -> Self {
        [region.x1, region.y1, region.x2, region.y2]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::new(255, 0, 0).to_hex(), "#FF0000");
        assert_eq!(Color::new(51, 102, 204).to_hex(), "#3366CC");
        assert_eq!(Color::new(0, 0, 0).to_hex(), "#000000");
    }

    #[test]
    fn test_color_serializes_as_sequence() {
        let color = Color::new(10, 20, 30);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "[10,20,30]");

        let parsed: Color = serde_json::from_str("[200,100,50]").unwrap();
        assert_eq!(parsed, Color::new(200, 100, 50));
    }

    #[test]
    fn test_color_palette_interop() {
        let color = Color::new(12, 34, 56);
        let srgb: Srgb<u8> = color.into();
        assert_eq!(Color::from(srgb), color);
    }

    #[test]
    fn test_region_validation() {
        assert!(Region::new(0, 0, 10, 10).is_ok());
        assert!(Region::new(10, 0, 10, 10).is_err());
        assert!(Region::new(0, 12, 10, 10).is_err());
    }

    #[test]
    fn test_region_geometry() {
        let region = Region::new(5, 10, 25, 14).unwrap();
        assert_eq!(region.width(), 20);
        assert_eq!(region.height(), 4);
        assert_eq!(region.area(), 80);
        assert!(region.fits_within(25, 14));
        assert!(!region.fits_within(24, 14));
    }

    #[test]
    fn test_region_deserialization_rejects_inverted() {
        let ok: Region = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(<[u32; 4]>::from(ok), [1, 2, 3, 4]);
        assert!(serde_json::from_str::<Region>("[3, 2, 1, 4]").is_err());
    }
}
