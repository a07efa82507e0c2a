//! Rendering context
//!
//! Owns the watch face engine. Waits on lifecycle events, weather snapshots
//! and the pending redraw deadline at once, and paints whenever the engine
//! asks for it.

use embassy_futures::select::{select3, Either3};
use embassy_time::Timer;
use log::{info, warn};

use nimbus_core::state::ZoneSubscription;
use nimbus_core::{FaceEvent, WatchFaceEngine};

use crate::channels::{FACE_EVENTS, WEATHER, ZONE_SUBSCRIPTION};
use crate::platform::{FrameSurface, LocalZone, SystemClock};

pub type Engine = WatchFaceEngine<SystemClock, LocalZone>;

/// Run the face until it is destroyed
pub async fn face_loop(mut engine: Engine, mut surface: FrameSurface) {
    info!("Face loop started, frames go to {}", surface.path().display());

    loop {
        let timer = engine.pending_timer();
        let now = engine.now_ms();
        let deadline = async move {
            match timer {
                Some(handle) => {
                    let delay = (handle.deadline_ms() - now).max(0) as u64;
                    Timer::after_millis(delay).await;
                    handle
                }
                None => core::future::pending().await,
            }
        };

        match select3(FACE_EVENTS.receive(), WEATHER.wait(), deadline).await {
            Either3::First(event) => {
                let response = engine.handle(event);
                match response.subscription {
                    ZoneSubscription::Register => ZONE_SUBSCRIPTION.signal(true),
                    ZoneSubscription::Unregister => ZONE_SUBSCRIPTION.signal(false),
                    ZoneSubscription::Unchanged => {}
                }
                if response.redraw {
                    paint(&mut surface, &engine);
                }
                if event == FaceEvent::Destroy {
                    info!("Face destroyed after {} frames", surface.frames());
                    return;
                }
            }
            Either3::Second(snapshot) => {
                if engine.apply_weather(snapshot) {
                    paint(&mut surface, &engine);
                }
            }
            Either3::Third(handle) => {
                if engine.on_timer(handle) {
                    paint(&mut surface, &engine);
                }
            }
        }
    }
}

fn paint(surface: &mut FrameSurface, engine: &Engine) {
    if let Err(e) = surface.paint(engine) {
        warn!("Frame not painted: {}", e);
    }
}
