//! Paint pass
//!
//! A pure function of the face state, the weather snapshot and the local
//! time. Interactive frames show seconds and the icon; ambient frames are
//! black, drop the seconds and never draw the icon.

use chrono::{DateTime, FixedOffset};
use nimbus_display::{Canvas, DisplayError, TextPaint};

use super::format::{format_date, format_temperature, format_time};
use super::layout::{center_x, FaceLayout, TextRow};
use crate::face::WatchFaceState;
use crate::weather::WeatherSnapshot;

/// Paint one frame onto `canvas`
pub fn render<S: Canvas>(
    canvas: &mut S,
    face: &WatchFaceState,
    weather: &WeatherSnapshot,
    now: &DateTime<FixedOffset>,
) -> Result<(), DisplayError> {
    let time = format_time(now, !face.ambient);
    let date = format_date(now);
    let temp = format_temperature(weather.max_temp(), weather.min_temp());

    let (time_paint, date_paint, temp_paint) =
        (face.time_paint(), face.date_paint(), face.temp_paint());
    let measure = |text: &str, paint: &TextPaint| TextRow {
        metrics: canvas.font_metrics(paint),
        width: canvas.measure_text(text, paint),
    };
    let rows = [
        measure(&time, time_paint),
        measure(&date, date_paint),
        measure(&temp, temp_paint),
    ];
    let surface_width = canvas.width() as f32;
    let layout = FaceLayout::compute(surface_width, face.y_offset, &rows[0], &rows[1], &rows[2]);

    canvas.fill(face.background())?;
    if !face.ambient {
        if let Some(icon) = weather.icon() {
            let x = center_x(surface_width, icon.width() as f32);
            canvas.draw_image(icon, x, layout.icon_top)?;
        }
    }

    canvas.draw_text(&time, layout.time.x, layout.time.y, time_paint)?;
    canvas.draw_text(&date, layout.date.x, layout.date.y, date_paint)?;
    canvas.draw_text(&temp, layout.temp.x, layout.temp.y, temp_paint)?;
    Ok(())
}
