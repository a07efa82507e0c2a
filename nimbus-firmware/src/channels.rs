//! Inter-task communication channels
//!
//! Defines the static channels between the rendering context and the
//! threads and tasks that feed it. All primitives use the critical-section
//! mutex, so the std threads (stdin, sync feed) can signal the executor
//! directly.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use nimbus_core::{FaceEvent, WeatherSnapshot};

/// Channel capacity for lifecycle events
const FACE_EVENT_CHANNEL_SIZE: usize = 8;

/// Lifecycle events for the face (host input, zone watcher)
pub static FACE_EVENTS: Channel<CriticalSectionRawMutex, FaceEvent, FACE_EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Latest snapshot from the sync thread
/// Only the newest matters; an unread one is overwritten
pub static WEATHER: Signal<CriticalSectionRawMutex, WeatherSnapshot> = Signal::new();

/// Whether the face wants time-zone change notifications
pub static ZONE_SUBSCRIPTION: Signal<CriticalSectionRawMutex, bool> = Signal::new();
