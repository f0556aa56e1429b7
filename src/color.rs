use std::str::FromStr;

use palette::{Hsv, IntoColor, Srgb};

use crate::error::ColorError;

/// Core color type used throughout the pipeline.
/// Wraps sRGB u8 components and provides the few conversions the theme
/// mapper and exporters need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800`, `#FF8800` or `ff8800`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 {
            return Err(ColorError::InvalidLength {
                value: hex.to_string(),
                len: digits.chars().count(),
            });
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit {
                value: hex.to_string(),
            });
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidDigit {
                value: hex.to_string(),
            })
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Uppercase `#RRGGBB`, for hex readouts in the UI only.
    pub fn to_hex_upper(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Perceptual brightness on a 0..=255 scale (`0.299R + 0.587G + 0.114B`).
    ///
    /// This is the ordering the theme mapper uses for background/foreground
    /// selection and the contrast check.
    pub fn luminance(self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }

    /// WCAG 2.0 relative luminance.
    ///
    /// Linearizes each sRGB channel, then computes the weighted sum.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG 2.0 contrast ratio between two colors, in [1, 21].
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f32 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Convert to HSV. Hue in degrees [0, 360), saturation and value in [0, 1].
    pub fn to_hsv(self) -> Hsv {
        self.to_srgb_f32().into_color()
    }

    /// Hue in degrees [0, 360). Zero for grays.
    pub fn hue(self) -> f32 {
        self.to_hsv().hue.into_positive_degrees()
    }

    /// Channels scaled to [0, 1], the space the extractor clusters in.
    pub fn to_srgb_f32(self) -> Srgb<f32> {
        Srgb::new(self.r, self.g, self.b).into_format()
    }

    /// Round an Srgb<f32> (clamped to [0, 1]) to the nearest integer triple.
    pub fn from_srgb_f32(srgb: Srgb<f32>) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: channel(srgb.red),
            g: channel(srgb.green),
            b: channel(srgb.blue),
        }
    }

    /// Linear interpolation toward `other`; `t` is clamped to [0, 1].
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| {
            (a as f32 + (b as f32 - a as f32) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Color {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
        }
    }

    /// Scale toward white by `factor`. Channels saturate at 255.
    pub fn brighten(self, factor: f32) -> Color {
        self.mix(Color::WHITE, factor)
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_sq(self, other: Color) -> u32 {
        let d = |a: u8, b: u8| (a as i32 - b as i32).pow(2) as u32;
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let original = Color::from_hex("#ff8800").unwrap();
        assert_eq!(original.r, 255);
        assert_eq!(original.g, 136);
        assert_eq!(original.b, 0);
        assert_eq!(original.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_uppercase_input() {
        let color = Color::from_hex("#FF8800").unwrap();
        assert_eq!(color.to_hex(), "#ff8800");
        assert_eq!(color.to_hex_upper(), "#FF8800");
    }

    #[test]
    fn hex_without_hash() {
        let color: Color = "aabbcc".parse().unwrap();
        assert_eq!(color.to_hex(), "#aabbcc");
    }

    #[test]
    fn hex_invalid_length() {
        assert!(matches!(
            Color::from_hex("#fff"),
            Err(ColorError::InvalidLength { len: 3, .. })
        ));
    }

    #[test]
    fn hex_invalid_chars() {
        assert!(matches!(
            Color::from_hex("#gggggg"),
            Err(ColorError::InvalidDigit { .. })
        ));
    }

    #[test]
    fn hex_multibyte_input_does_not_panic() {
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(Color::BLACK.luminance(), 0.0);
        assert!((Color::WHITE.luminance() - 255.0).abs() < 0.01);
    }

    #[test]
    fn luminance_weights_green_highest() {
        let red = Color::new(255, 0, 0).luminance();
        let green = Color::new(0, 255, 0).luminance();
        let blue = Color::new(0, 0, 255).luminance();
        assert!(green > red && red > blue);
    }

    #[test]
    fn contrast_ratio_black_white() {
        let ratio = Color::contrast_ratio(&Color::BLACK, &Color::WHITE);
        assert!(
            (ratio - 21.0).abs() < 0.1,
            "black/white contrast should be ~21:1, got {ratio}"
        );
    }

    #[test]
    fn hue_of_primaries() {
        assert!(Color::new(255, 0, 0).hue().abs() < 0.5);
        assert!((Color::new(0, 255, 0).hue() - 120.0).abs() < 0.5);
        assert!((Color::new(0, 0, 255).hue() - 240.0).abs() < 0.5);
        assert!((Color::new(255, 255, 0).hue() - 60.0).abs() < 0.5);
    }

    #[test]
    fn gray_has_zero_saturation() {
        let hsv = Color::new(128, 128, 128).to_hsv();
        assert!(hsv.saturation < 0.001);
    }

    #[test]
    fn srgb_f32_round_trip_is_exact() {
        for color in [Color::new(200, 100, 50), Color::BLACK, Color::WHITE] {
            assert_eq!(Color::from_srgb_f32(color.to_srgb_f32()), color);
        }
    }

    #[test]
    fn mix_endpoints() {
        let a = Color::new(10, 20, 30);
        let b = Color::new(110, 220, 130);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), Color::new(60, 120, 80));
    }

    #[test]
    fn brighten_moves_toward_white_and_clamps() {
        let base = Color::new(200, 0, 100);
        let bright = base.brighten(0.25);
        assert!(bright.r > base.r && bright.g > base.g && bright.b > base.b);
        assert_eq!(Color::WHITE.brighten(0.25), Color::WHITE);
        assert_eq!(Color::WHITE.brighten(5.0), Color::WHITE);
    }

    #[test]
    fn display_matches_to_hex() {
        let color = Color::new(171, 205, 239);
        assert_eq!(format!("{color}"), color.to_hex());
    }
}
