//! Host implementations of the face's collaborators
//!
//! - [`storage`] - preferences file and blob directory
//! - [`assets`] - asset transport backed by a directory
//! - [`clock`] - wall clock and system time zone
//! - [`surface`] - framebuffer written out as PNG after each paint

pub mod assets;
pub mod clock;
pub mod storage;
pub mod surface;

use std::path::PathBuf;

use thiserror::Error;

use nimbus_display::DisplayError;

pub use assets::DirAssetTransport;
pub use clock::{LocalZone, SystemClock};
pub use storage::{FileBlobStore, FilePreferences};
pub use surface::FrameSurface;

/// Host platform errors
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("cannot prepare {path}: {source}")]
    Prepare {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("paint failed: {0:?}")]
    Display(DisplayError),
    #[error("cannot save frame to {path}: {message}")]
    SaveFrame { path: PathBuf, message: String },
}
