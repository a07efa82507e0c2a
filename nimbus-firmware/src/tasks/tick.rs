//! Ambient tick task
//!
//! Stands in for the framework's once-a-minute time tick. Ticks land on
//! wall-clock minute boundaries and are sent whatever the display state;
//! the engine repaints only a visible ambient face.

use embassy_time::Timer;
use log::info;

use nimbus_core::scheduler::delay_until_next_minute;
use nimbus_core::{Clock, FaceEvent};

use crate::channels::FACE_EVENTS;
use crate::platform::SystemClock;

/// Milliseconds to sleep before the next tick
pub fn next_tick_delay_ms<C: Clock>(clock: &C) -> u64 {
    delay_until_next_minute(clock.now_ms()) as u64
}

#[embassy_executor::task]
pub async fn ambient_tick_task(clock: SystemClock) {
    info!("Ambient tick task started");

    loop {
        Timer::after_millis(next_tick_delay_ms(&clock)).await;
        FACE_EVENTS.send(FaceEvent::TimeTick).await;
    }
}
