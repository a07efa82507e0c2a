//! Rendering context and the threads and tasks that feed it
//!
//! Each one runs independently and communicates via channels/signals.

pub mod face;
pub mod host_input;
pub mod sync;
pub mod tick;
pub mod zone_watch;

pub use face::face_loop;
pub use host_input::spawn_host_input;
pub use sync::{spawn_sync, WeatherCache};
pub use tick::ambient_tick_task;
pub use zone_watch::zone_watch_task;
