//! Framebuffer surface
//!
//! The face paints into an in-memory RGB888 framebuffer; each finished
//! frame is written to `frame_path` as a PNG so it can be watched from
//! outside the process.

use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use log::trace;

use nimbus_core::{Clock, WatchFaceEngine, ZoneProvider};
use nimbus_display::eg::EgCanvas;

use super::PlatformError;

pub struct FrameSurface {
    display: SimulatorDisplay<Rgb888>,
    output: OutputSettings,
    path: PathBuf,
    frames: u64,
}

impl FrameSurface {
    pub fn new(width: u32, height: u32, path: PathBuf) -> Result<Self, PlatformError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| PlatformError::Prepare {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Self {
            display: SimulatorDisplay::new(Size::new(width, height)),
            output: OutputSettingsBuilder::new().build(),
            path,
            frames: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames painted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Color of one framebuffer pixel
    #[cfg(test)]
    pub fn pixel(&self, point: Point) -> Rgb888 {
        self.display.get_pixel(point)
    }

    /// Paint one frame of `engine` and publish it
    pub fn paint<C: Clock, Z: ZoneProvider>(
        &mut self,
        engine: &WatchFaceEngine<C, Z>,
    ) -> Result<(), PlatformError> {
        engine
            .draw(&mut EgCanvas::new(&mut self.display))
            .map_err(PlatformError::Display)?;
        self.frames += 1;

        self.display
            .to_rgb_output_image(&self.output)
            .save_png(&self.path)
            .map_err(|e| PlatformError::SaveFrame {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        trace!("Frame {} written to {}", self.frames, self.path.display());
        Ok(())
    }
}
