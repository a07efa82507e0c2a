//! Board-agnostic core logic for the Nimbus watch face
//!
//! This crate contains all application logic that does not depend on a
//! particular host framework or storage medium:
//!
//! - Time source (clock + zone offset)
//! - Display state machine and the 1 Hz redraw scheduler
//! - Renderer with the stacked time/date/temperature layout
//! - Weather sync channel, asset resolution and the weather cache
//! - Face configuration types
//! - `WatchFaceEngine`, which owns everything on the rendering context
//!
//! Collaborators (stores, asset transport, image codec, drawing surface)
//! are traits from `nimbus-hal` and `nimbus-display`.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

// Must come first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

pub mod config;
pub mod face;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod time;
pub mod weather;

pub use face::{Response, WatchFaceEngine};
pub use state::{DisplayState, DisplayStateMachine, FaceEvent};
pub use time::{Clock, TimeSource, ZoneProvider};
pub use weather::{Cache, WeatherSnapshot, WeatherSyncChannel};
