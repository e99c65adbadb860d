use std::fmt;

use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) 8-bit sRGB color.
///
/// This is the unit palettes are made of and the value the flood fill writes
/// into pixel buffers. Fills carry their own fixed alpha (see `FillParams`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decodes exactly six hex digits, with or without a leading `#`.
    ///
    /// Shorthand (`#fff`) and alpha (`#rrggbbaa`) forms are rejected.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Canonical `#rrggbb` form, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_accepts_both_prefix_forms() {
        assert_eq!(Rgb::from_hex("#3498db"), Some(Rgb::new(0x34, 0x98, 0xdb)));
        assert_eq!(Rgb::from_hex("3498DB"), Some(Rgb::new(0x34, 0x98, 0xdb)));
    }

    #[test]
    fn from_hex_rejects_other_lengths() {
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#ff000080"), None);
        assert_eq!(Rgb::from_hex(""), None);
        assert_eq!(Rgb::from_hex("#"), None);
    }

    #[test]
    fn from_hex_rejects_non_hex_and_multibyte() {
        assert_eq!(Rgb::from_hex("#gg0000"), None);
        assert_eq!(Rgb::from_hex("#ééé"), None);
    }

    #[test]
    fn to_hex_is_lowercase_and_padded() {
        assert_eq!(Rgb::new(0, 10, 255).to_hex(), "#000aff");
        assert_eq!(Rgb::new(0xC0, 0x39, 0x2B).to_string(), "#c0392b");
    }
}
