use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// A `#rrggbb` color as it appears in the catalog or in an extracted palette.
///
/// Catalog values are trusted and kept verbatim; equality between two values
/// goes through [`ColorHex::matches`], which ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorHex(String);

impl ColorHex {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Validates user-typed input. Catalog data goes through [`ColorHex::new`].
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(DomainError::InvalidColorHex(value.to_string()));
        };
        if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(DomainError::InvalidColorHex(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(format!("#{red:02x}{green:02x}{blue:02x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> Self {
        Self(self.0.to_ascii_lowercase())
    }

    pub fn matches(&self, other: &ColorHex) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Display for ColorHex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One color of a palette extracted from an uploaded image.
///
/// `hue`, `saturation`, `lightness` and `intensity` are in `[0, 1]`. `area` is
/// the share of sampled pixels this color covers; areas of one palette are not
/// normalized and may sum to less than 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedColor {
    pub hex: ColorHex,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub hue: f32,
    pub intensity: f32,
    pub lightness: f32,
    pub saturation: f32,
    pub area: f32,
}

impl ExtractedColor {
    pub fn from_rgb(red: u8, green: u8, blue: u8, area: f32) -> Self {
        let r = f32::from(red) / 255.0;
        let g = f32::from(green) / 255.0;
        let b = f32::from(blue) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        let (hue, saturation, intensity) = if max == min {
            (0.0, 0.0, 0.0)
        } else {
            let distance = max - min;
            let saturation = if lightness > 0.5 {
                distance / (2.0 - max - min)
            } else {
                distance / (max + min)
            };
            let intensity = saturation * ((0.5 - (0.5 - lightness).abs()) * 2.0);
            let sector = if max == r {
                (g - b) / distance + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / distance + 2.0
            } else {
                (r - g) / distance + 4.0
            };
            (sector / 6.0, saturation, intensity)
        };

        Self {
            hex: ColorHex::from_rgb(red, green, blue),
            red,
            green,
            blue,
            hue,
            intensity,
            lightness,
            saturation,
            area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_six_digit_hex_in_any_case() {
        assert_eq!(
            ColorHex::parse("#FFaa00").expect("valid").as_str(),
            "#FFaa00"
        );
        assert!(matches!(
            ColorHex::parse("ffaa00"),
            Err(DomainError::InvalidColorHex(_))
        ));
        assert!(matches!(
            ColorHex::parse("#ffaa0"),
            Err(DomainError::InvalidColorHex(_))
        ));
        assert!(matches!(
            ColorHex::parse("#ggaa00"),
            Err(DomainError::InvalidColorHex(_))
        ));
    }

    #[test]
    fn matching_ignores_case() {
        let upper = ColorHex::new("#FF0000");
        let lower = ColorHex::new("#ff0000");
        assert!(upper.matches(&lower));
        assert_ne!(upper, lower);
        assert_eq!(upper.normalized(), lower);
    }

    #[test]
    fn from_rgb_writes_lowercase_hex() {
        let hex = ColorHex::from_rgb(18, 52, 171);
        assert_eq!(hex.as_str(), "#1234ab");
        assert_eq!(ColorHex::from_rgb(0, 0, 0).as_str(), "#000000");
    }

    #[test]
    fn extracted_color_computes_hsl() {
        let red = ExtractedColor::from_rgb(255, 0, 0, 0.5);
        assert_eq!(red.hex.as_str(), "#ff0000");
        assert_eq!(red.hue, 0.0);
        assert!((red.saturation - 1.0).abs() < 1e-6);
        assert!((red.lightness - 0.5).abs() < 1e-6);
        assert!((red.intensity - 1.0).abs() < 1e-6);

        let blue = ExtractedColor::from_rgb(0, 0, 255, 0.1);
        assert!((blue.hue - 2.0 / 3.0).abs() < 1e-6);

        let gray = ExtractedColor::from_rgb(128, 128, 128, 0.1);
        assert_eq!(gray.saturation, 0.0);
        assert_eq!(gray.intensity, 0.0);
    }
}
