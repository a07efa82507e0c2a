//! Mutable face state
//!
//! Flags mirrored from the state machine plus the dimensions and paints
//! the renderer needs. Changed only by lifecycle events.

use nimbus_display::{Color, TextPaint};

use crate::config::{FaceConfig, ShapeDimensions};
use crate::state::DisplayStateMachine;

#[derive(Debug, Clone, PartialEq)]
pub struct WatchFaceState {
    pub visible: bool,
    pub ambient: bool,
    pub low_bit_ambient: bool,
    pub x_offset: f32,
    pub y_offset: f32,
    background: Color,
    time_paint: TextPaint,
    date_paint: TextPaint,
    temp_paint: TextPaint,
}

impl WatchFaceState {
    /// State for a square screen until insets say otherwise
    pub fn new(config: &FaceConfig) -> Self {
        let dims = config.dimensions.square;
        let palette = &config.palette;
        Self {
            visible: false,
            ambient: false,
            low_bit_ambient: false,
            x_offset: dims.x_offset,
            y_offset: config.dimensions.y_offset,
            background: palette.background(),
            time_paint: palette.time_paint(dims.time_text_size),
            date_paint: palette.date_paint(dims.date_text_size),
            temp_paint: palette.temp_paint(dims.temp_text_size),
        }
    }

    /// Switch to the dimension set of a screen shape
    pub fn apply_shape(&mut self, dims: ShapeDimensions) {
        self.x_offset = dims.x_offset;
        self.time_paint.size = dims.time_text_size;
        self.date_paint.size = dims.date_text_size;
        self.temp_paint.size = dims.temp_text_size;
    }

    /// Set anti-aliasing on all three text paints
    pub fn set_anti_alias(&mut self, on: bool) {
        self.time_paint.anti_alias = on;
        self.date_paint.anti_alias = on;
        self.temp_paint.anti_alias = on;
    }

    /// Copy the flags from the state machine
    pub fn sync_flags(&mut self, machine: &DisplayStateMachine) {
        self.visible = machine.is_visible();
        self.ambient = machine.is_ambient();
        self.low_bit_ambient = machine.low_bit_ambient();
    }

    /// Background colour for the current mode
    pub fn background(&self) -> Color {
        if self.ambient {
            Color::BLACK
        } else {
            self.background
        }
    }

    pub fn time_paint(&self) -> &TextPaint {
        &self.time_paint
    }

    pub fn date_paint(&self) -> &TextPaint {
        &self.date_paint
    }

    pub fn temp_paint(&self) -> &TextPaint {
        &self.temp_paint
    }

    pub fn time_text_size(&self) -> f32 {
        self.time_paint.size
    }

    pub fn date_text_size(&self) -> f32 {
        self.date_paint.size
    }

    pub fn temp_text_size(&self) -> f32 {
        self.temp_paint.size
    }
}
