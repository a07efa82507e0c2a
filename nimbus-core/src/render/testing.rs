//! Recording canvas for tests

use alloc::string::String;
use alloc::vec::Vec;

use nimbus_display::{Canvas, Color, DisplayError, FontMetrics, Image, TextPaint};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Fill(Color),
    Text {
        text: String,
        x: f32,
        y: f32,
        anti_alias: bool,
    },
    Image {
        x: f32,
        y: f32,
    },
}

/// Canvas with synthetic metrics that records every call
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    pub ops: Vec<Op>,
    pub fail: bool,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            fail: false,
        }
    }

    /// (ascent, descent) reported for a text size
    pub fn metrics_for(size: f32) -> (f32, f32) {
        (-(size * 0.75), size * 0.25)
    }

    /// Width reported for `text` at `size`
    pub fn width_for(text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    /// Position of the `n`th text drawn
    pub fn text_at(&self, n: usize) -> (f32, f32) {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .nth(n)
            .unwrap()
    }

    /// Anti-alias flag of every text drawn
    pub fn anti_alias_flags(&self) -> Vec<bool> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { anti_alias, .. } => Some(*anti_alias),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.ops.push(Op::Fill(color));
        Ok(())
    }

    fn font_metrics(&self, paint: &TextPaint) -> FontMetrics {
        let (ascent, descent) = Self::metrics_for(paint.size);
        FontMetrics { ascent, descent }
    }

    fn measure_text(&self, text: &str, paint: &TextPaint) -> f32 {
        Self::width_for(text, paint.size)
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        paint: &TextPaint,
    ) -> Result<(), DisplayError> {
        self.ops.push(Op::Text {
            text: text.into(),
            x,
            y,
            anti_alias: paint.anti_alias,
        });
        Ok(())
    }

    fn draw_image(&mut self, _image: &Image, x: f32, y: f32) -> Result<(), DisplayError> {
        self.ops.push(Op::Image { x, y });
        Ok(())
    }
}
