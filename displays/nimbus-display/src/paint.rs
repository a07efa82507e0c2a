//! Colors and text paints

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Build a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Pack into `0xRRGGBB`
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// How to draw a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextPaint {
    /// Text color
    pub color: Color,
    /// Requested text size in pixels
    pub size: f32,
    /// Whether glyph edges are smoothed
    pub anti_alias: bool,
}

impl TextPaint {
    /// A paint with anti-aliasing enabled
    pub const fn new(color: Color, size: f32) -> Self {
        Self {
            color,
            size,
            anti_alias: true,
        }
    }
}

/// Vertical font metrics relative to the baseline
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontMetrics {
    /// Distance from baseline to the top of the tallest glyph (negative)
    pub ascent: f32,
    /// Distance from baseline to the bottom of the lowest glyph (positive)
    pub descent: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let c = Color::from_hex(0x1A2B3C);
        assert_eq!(c, Color::rgb(0x1A, 0x2B, 0x3C));
        assert_eq!(c.to_hex(), 0x1A2B3C);
    }

    #[test]
    fn test_new_paint_is_anti_aliased() {
        assert!(TextPaint::new(Color::WHITE, 12.0).anti_alias);
    }
}
