//! Stacked layout
//!
//! Rows are stacked without fixed gaps: each baseline sits the previous
//! row's descent plus the current row's ascent below the previous baseline.
//!
//! ```text
//! y(time) = y_offset
//! y(date) = y(time) + descent(time) - ascent(date)
//! y(temp) = y(date) + descent(date) - ascent(temp)
//! y(icon) = y(temp) + descent(temp) - ascent(temp)
//! ```
//!
//! Ascents are negative, so every step moves down. Vertical positions never
//! depend on the surface width; each row is centred on its measured width.

use nimbus_display::FontMetrics;

/// Measured text row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRow {
    pub metrics: FontMetrics,
    pub width: f32,
}

/// Left edge and baseline of one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPosition {
    pub x: f32,
    pub y: f32,
}

/// Horizontal start that centres `measured` on a surface `surface_width` wide
pub fn center_x(surface_width: f32, measured: f32) -> f32 {
    (surface_width - measured) / 2.0
}

/// Positions for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLayout {
    pub time: RowPosition,
    pub date: RowPosition,
    pub temp: RowPosition,
    /// Top edge of the icon slot
    pub icon_top: f32,
}

impl FaceLayout {
    pub fn compute(
        surface_width: f32,
        y_offset: f32,
        time: &TextRow,
        date: &TextRow,
        temp: &TextRow,
    ) -> Self {
        let time_y = y_offset;
        let date_y = time_y + time.metrics.descent - date.metrics.ascent;
        let temp_y = date_y + date.metrics.descent - temp.metrics.ascent;
        let icon_top = temp_y + temp.metrics.descent - temp.metrics.ascent;

        Self {
            time: RowPosition {
                x: center_x(surface_width, time.width),
                y: time_y,
            },
            date: RowPosition {
                x: center_x(surface_width, date.width),
                y: date_y,
            },
            temp: RowPosition {
                x: center_x(surface_width, temp.width),
                y: temp_y,
            },
            icon_top,
        }
    }
}
