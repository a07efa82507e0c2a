//! Configuration type definitions
//!
//! Style flags for the host framework, the two dimension sets (square and
//! round screens) and the palette. Colours are stored as `0xRRGGBB`.

use nimbus_display::{Color, TextPaint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How notification cards peek over the face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PeekMode {
    /// Cards peek a single line
    Short,
    /// Cards peek as far as their content needs
    #[default]
    Variable,
}

/// When the card background is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackgroundVisibility {
    /// Only for interruptive notifications
    #[default]
    Interruptive,
    /// Always
    Persistent,
}

/// Style flags passed to the host framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceStyle {
    pub peek_mode: PeekMode,
    pub background_visibility: BackgroundVisibility,
    /// Let the system draw its own clock over the face
    pub show_system_ui_time: bool,
    pub accepts_tap_events: bool,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            peek_mode: PeekMode::Variable,
            background_visibility: BackgroundVisibility::Interruptive,
            show_system_ui_time: false,
            accepts_tap_events: true,
        }
    }
}

/// Dimensions that differ between square and round screens
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeDimensions {
    pub x_offset: f32,
    pub time_text_size: f32,
    pub date_text_size: f32,
    pub temp_text_size: f32,
}

/// Face dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dimensions {
    /// Baseline of the time row
    pub y_offset: f32,
    pub square: ShapeDimensions,
    pub round: ShapeDimensions,
}

impl Dimensions {
    /// Dimension set for a screen shape
    pub fn for_shape(&self, round: bool) -> ShapeDimensions {
        if round {
            self.round
        } else {
            self.square
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            y_offset: 80.0,
            square: ShapeDimensions {
                x_offset: 15.0,
                time_text_size: 40.0,
                date_text_size: 16.0,
                temp_text_size: 20.0,
            },
            round: ShapeDimensions {
                x_offset: 25.0,
                time_text_size: 45.0,
                date_text_size: 18.0,
                temp_text_size: 22.0,
            },
        }
    }
}

/// Face colours as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Palette {
    /// Interactive background; ambient is always black
    pub background: u32,
    pub time_text: u32,
    pub date_text: u32,
    pub temp_text: u32,
}

impl Palette {
    pub fn background(&self) -> Color {
        Color::from_hex(self.background)
    }

    /// Text paint for the time row
    pub fn time_paint(&self, size: f32) -> TextPaint {
        TextPaint::new(Color::from_hex(self.time_text), size)
    }

    /// Text paint for the date row
    pub fn date_paint(&self, size: f32) -> TextPaint {
        TextPaint::new(Color::from_hex(self.date_text), size)
    }

    /// Text paint for the temperature row
    pub fn temp_paint(&self, size: f32) -> TextPaint {
        TextPaint::new(Color::from_hex(self.temp_text), size)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: 0x03A9F4,
            time_text: 0xFFFFFF,
            date_text: 0xB3E5FC,
            temp_text: 0xFFFFFF,
        }
    }
}

/// Complete face configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    pub style: FaceStyle,
    pub dimensions: Dimensions,
    pub palette: Palette,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = FaceStyle::default();
        assert_eq!(style.peek_mode, PeekMode::Variable);
        assert_eq!(style.background_visibility, BackgroundVisibility::Interruptive);
        assert!(!style.show_system_ui_time);
        assert!(style.accepts_tap_events);
    }

    #[test]
    fn test_shape_selection() {
        let dims = Dimensions::default();
        assert_eq!(dims.for_shape(false), dims.square);
        assert_eq!(dims.for_shape(true), dims.round);
        assert!(dims.round.time_text_size > dims.square.time_text_size);
    }

    #[test]
    fn test_palette_paints() {
        let palette = Palette::default();
        let paint = palette.date_paint(16.0);
        assert_eq!(paint.color, Color::from_hex(0xB3E5FC));
        assert_eq!(paint.size, 16.0);
        assert!(paint.anti_alias);
    }
}
