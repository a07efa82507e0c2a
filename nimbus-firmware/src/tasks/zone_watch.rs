//! Time-zone watcher
//!
//! The host has no zone-change broadcast, so while the face is subscribed
//! the system offset is polled and a `TimeZoneChanged` event is sent
//! whenever it moves.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use log::{debug, info};

use nimbus_core::{FaceEvent, ZoneProvider};

use crate::channels::{FACE_EVENTS, ZONE_SUBSCRIPTION};
use crate::platform::LocalZone;

/// How often the offset is checked while subscribed
pub const ZONE_POLL_INTERVAL: Duration = Duration::from_secs(60);

#[embassy_executor::task]
pub async fn zone_watch_task(zones: LocalZone) {
    info!("Zone watch task started");

    let mut subscribed = false;
    let mut last = zones.current_offset();

    loop {
        if !subscribed {
            subscribed = ZONE_SUBSCRIPTION.wait().await;
            last = zones.current_offset();
            debug!("Zone subscription: {}", subscribed);
            continue;
        }

        match select(ZONE_SUBSCRIPTION.wait(), Timer::after(ZONE_POLL_INTERVAL)).await {
            Either::First(on) => {
                subscribed = on;
                debug!("Zone subscription: {}", subscribed);
            }
            Either::Second(()) => {
                let offset = zones.current_offset();
                if offset != last {
                    info!("Time zone moved from {} to {}", last, offset);
                    last = offset;
                    FACE_EVENTS.send(FaceEvent::TimeZoneChanged(offset)).await;
                }
            }
        }
    }
}
