//! Watch face rendering context
//!
//! `WatchFaceEngine` owns everything that runs on the rendering context:
//! the face state, the display state machine, the redraw scheduler, the
//! time source and the current weather snapshot.

pub mod engine;
pub mod state;

pub use engine::{Response, WatchFaceEngine};
pub use state::WatchFaceState;
