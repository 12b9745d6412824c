//! Color representation and hex string parsing.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Parse a hex-like color string to a color.
///
/// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa`; anything else degrades to
/// opaque black. The input boundary (a color picker) already constrains the
/// format, so parsing stays lenient.
pub fn parse_hex_color(color: &str) -> SerializableColor {
    if color == "transparent" {
        return SerializableColor::transparent();
    }

    if let Some(hex) = color.strip_prefix('#') {
        let hex = hex.trim();
        if hex.chars().all(|c| c.is_ascii_hexdigit()) {
            match hex.len() {
                3 => {
                    // #rgb -> #rrggbb
                    let r = u8::from_str_radix(&hex[0..1], 16).unwrap_or(0) * 17;
                    let g = u8::from_str_radix(&hex[1..2], 16).unwrap_or(0) * 17;
                    let b = u8::from_str_radix(&hex[2..3], 16).unwrap_or(0) * 17;
                    return SerializableColor::new(r, g, b, 255);
                }
                6 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                    return SerializableColor::new(r, g, b, 255);
                }
                8 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                    let a = u8::from_str_radix(&hex[6..8], 16).unwrap_or(255);
                    return SerializableColor::new(r, g, b, a);
                }
                _ => {}
            }
        }
    }

    SerializableColor::black()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_hex_color("#f00"), SerializableColor::new(255, 0, 0, 255));
    }

    #[test]
    fn test_parse_full_hex() {
        assert_eq!(parse_hex_color("#ff0000"), SerializableColor::new(255, 0, 0, 255));
        assert_eq!(parse_hex_color("#1971c2"), SerializableColor::new(25, 113, 194, 255));
    }

    #[test]
    fn test_parse_hex_with_alpha() {
        assert_eq!(parse_hex_color("#ff000080"), SerializableColor::new(255, 0, 0, 128));
    }

    #[test]
    fn test_parse_transparent() {
        assert_eq!(parse_hex_color("transparent"), SerializableColor::transparent());
    }

    #[test]
    fn test_garbage_falls_back_to_black() {
        assert_eq!(parse_hex_color("red"), SerializableColor::black());
        assert_eq!(parse_hex_color("#zzzzzz"), SerializableColor::black());
        assert_eq!(parse_hex_color(""), SerializableColor::black());
        assert_eq!(parse_hex_color("#ff00"), SerializableColor::black());
    }

    #[test]
    fn test_color_conversion_roundtrip() {
        let c = SerializableColor::new(10, 20, 30, 40);
        let peniko: Color = c.into();
        assert_eq!(SerializableColor::from(peniko), c);
    }
}
