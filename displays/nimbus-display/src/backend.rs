//! Drawing surface trait
//!
//! Defines the interface of the surface the host framework lends to the
//! face for one paint pass.

use crate::image::Image;
use crate::paint::{Color, FontMetrics, TextPaint};

/// Drawing surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display
    Communication,
    /// Coordinates outside the surface
    InvalidCoordinates,
    /// Surface not ready for drawing
    NotInitialized,
}

/// Drawing surface
///
/// Coordinates are in pixels with the origin at the top-left corner.
/// Text is positioned by its baseline; font metrics follow the usual
/// convention of a negative ascent (above the baseline) and a positive
/// descent (below it).
pub trait Canvas {
    /// Surface size in pixels as (width, height)
    fn size(&self) -> (u32, u32);

    /// Fill the entire surface
    fn fill(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Vertical metrics of the font selected by `paint`
    fn font_metrics(&self, paint: &TextPaint) -> FontMetrics;

    /// Rendered width of `text` in pixels
    fn measure_text(&self, text: &str, paint: &TextPaint) -> f32;

    /// Draw `text` with its left edge at `x` and its baseline at `y`
    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        paint: &TextPaint,
    ) -> Result<(), DisplayError>;

    /// Draw `image` with its top-left corner at (`x`, `y`)
    fn draw_image(&mut self, image: &Image, x: f32, y: f32) -> Result<(), DisplayError>;

    /// Surface width in pixels
    fn width(&self) -> u32 {
        self.size().0
    }
}
