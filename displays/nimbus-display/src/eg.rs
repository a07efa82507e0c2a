//! Canvas adapter for embedded-graphics draw targets
//!
//! Text sizes are mapped onto the ProFont family: the largest point size
//! whose cell height fits the requested size is used. Monospace glyphs have
//! no smoothing, so the paint's anti-alias flag does not change the output.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use profont::{
    PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT,
    PROFONT_7_POINT, PROFONT_9_POINT,
};

use crate::backend::{Canvas, DisplayError};
use crate::image::Image;
use crate::paint::{Color, FontMetrics, TextPaint};

/// Alpha at or above which an icon pixel is drawn
const ALPHA_THRESHOLD: u8 = 128;

/// Available fonts, largest first
static FONTS: [&MonoFont<'static>; 7] = [
    &PROFONT_24_POINT,
    &PROFONT_18_POINT,
    &PROFONT_14_POINT,
    &PROFONT_12_POINT,
    &PROFONT_10_POINT,
    &PROFONT_9_POINT,
    &PROFONT_7_POINT,
];

/// Pick the font used for a requested text size
pub fn font_for_size(size: f32) -> &'static MonoFont<'static> {
    FONTS
        .iter()
        .copied()
        .find(|font| font.character_size.height as f32 <= size)
        .unwrap_or(&PROFONT_7_POINT)
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.r, color.g, color.b)
    }
}

/// A `Canvas` over any RGB888 draw target
pub struct EgCanvas<'a, D> {
    target: &'a mut D,
}

impl<'a, D> EgCanvas<'a, D>
where
    D: DrawTarget<Color = Rgb888> + OriginDimensions,
{
    /// Borrow `target` for one paint pass
    pub fn new(target: &'a mut D) -> Self {
        Self { target }
    }
}

impl<D> Canvas for EgCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb888> + OriginDimensions,
{
    fn size(&self) -> (u32, u32) {
        let size = self.target.size();
        (size.width, size.height)
    }

    fn fill(&mut self, color: Color) -> Result<(), DisplayError> {
        self.target
            .clear(color.into())
            .map_err(|_| DisplayError::Communication)
    }

    fn font_metrics(&self, paint: &TextPaint) -> FontMetrics {
        let font = font_for_size(paint.size);
        FontMetrics {
            ascent: -(font.baseline as f32),
            descent: font.character_size.height as f32 - font.baseline as f32,
        }
    }

    fn measure_text(&self, text: &str, paint: &TextPaint) -> f32 {
        let font = font_for_size(paint.size);
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return 0.0;
        }
        (chars * font.character_size.width + (chars - 1) * font.character_spacing) as f32
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        paint: &TextPaint,
    ) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(font_for_size(paint.size), paint.color.into());
        Text::with_baseline(text, Point::new(x as i32, y as i32), style, Baseline::Alphabetic)
            .draw(self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_image(&mut self, image: &Image, x: f32, y: f32) -> Result<(), DisplayError> {
        let origin = Point::new(x as i32, y as i32);
        let pixels = image.rows().enumerate().flat_map(|(row, data)| {
            data.chunks_exact(4)
                .enumerate()
                .filter(|(_, px)| px[3] >= ALPHA_THRESHOLD)
                .map(move |(col, px)| {
                    Pixel(
                        origin + Point::new(col as i32, row as i32),
                        Rgb888::new(px[0], px[1], px[2]),
                    )
                })
        });
        self.target
            .draw_iter(pixels)
            .map_err(|_| DisplayError::Communication)
    }
}
