use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit sRGB color as edited in the panel
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([0xff, 0xff, 0xff]);
    pub const GREEN: Rgb = Rgb([0x00, 0xff, 0x00]);

    pub const fn from_hex(hex: u32) -> Self {
        Self([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
    }

    pub const fn to_hex(self) -> u32 {
        ((self.0[0] as u32) << 16) | ((self.0[1] as u32) << 8) | self.0[2] as u32
    }

    /// Parses `#rrggbb` or `rrggbb`
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    /// Linear-light RGB scaled by `intensity`
    pub fn to_linear(self, intensity: f32) -> [f32; 3] {
        self.0.map(|c| srgb_to_linear(c as f32 / 255.0) * intensity)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_green() {
        let green = Rgb::from_hex(0x00ff00);
        assert_eq!(green, Rgb::GREEN);
        assert_eq!(green.to_hex(), 0x00ff00);
        assert_eq!(green.to_string(), "#00ff00");
    }

    #[test]
    fn test_parse_accepts_optional_hash() {
        assert_eq!(Rgb::parse("#ff69b4"), Some(Rgb::from_hex(0xff69b4)));
        assert_eq!(Rgb::parse("ffffff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse("#fff"), None);
        assert_eq!(Rgb::parse("zzzzzz"), None);
    }

    #[test]
    fn test_linear_endpoints() {
        let white = Rgb::WHITE.to_linear(0.5);
        assert!((white[0] - 0.5).abs() < 1e-5);
        assert_eq!(Rgb([0, 0, 0]).to_linear(1.0), [0.0, 0.0, 0.0]);
    }
}
