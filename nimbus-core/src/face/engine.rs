//! Watch face engine
//!
//! All lifecycle events, timer firings and weather hand-offs for one face
//! go through here, serialized on the rendering context. The engine never
//! blocks and never sleeps: it reports the deadline of its pending redraw
//! timer and the owner wakes it with `on_timer`.

use chrono::FixedOffset;
use nimbus_display::{Canvas, DisplayError};

use super::state::WatchFaceState;
use crate::config::{FaceConfig, FaceStyle};
use crate::render;
use crate::scheduler::{CancelToken, RedrawScheduler, TickOutcome, TimerHandle};
use crate::state::{DisplayState, DisplayStateMachine, FaceEvent, ZoneSubscription};
use crate::time::{Clock, TimeSource, ZoneProvider};
use crate::weather::WeatherSnapshot;

/// What the owner must do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// Paint one frame
    pub redraw: bool,
    /// Start or stop delivering zone-change notifications
    pub subscription: ZoneSubscription,
}

/// Rendering-context owner of one face
pub struct WatchFaceEngine<C, Z> {
    config: FaceConfig,
    face: WatchFaceState,
    machine: DisplayStateMachine,
    scheduler: RedrawScheduler,
    time: TimeSource<C, Z>,
    weather: WeatherSnapshot,
}

impl<C: Clock, Z: ZoneProvider> WatchFaceEngine<C, Z> {
    /// Create the engine with the snapshot loaded from the cache
    pub fn new(config: FaceConfig, time: TimeSource<C, Z>, weather: WeatherSnapshot) -> Self {
        Self {
            face: WatchFaceState::new(&config),
            config,
            machine: DisplayStateMachine::new(),
            scheduler: RedrawScheduler::new(),
            time,
            weather,
        }
    }

    /// Style flags for the host framework
    pub fn style(&self) -> FaceStyle {
        self.config.style
    }

    pub fn display_state(&self) -> DisplayState {
        self.machine.state()
    }

    pub fn face(&self) -> &WatchFaceState {
        &self.face
    }

    pub fn weather(&self) -> &WeatherSnapshot {
        &self.weather
    }

    pub fn zone(&self) -> FixedOffset {
        self.time.offset()
    }

    /// Milliseconds since the Unix epoch, from the engine's clock
    pub fn now_ms(&self) -> i64 {
        self.time.now_ms()
    }

    /// The pending redraw timer, if any
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.scheduler.pending()
    }

    /// Token that stops the redraw timer for good
    pub fn cancel_token(&self) -> CancelToken {
        self.scheduler.cancel_token()
    }

    /// Apply a lifecycle event
    pub fn handle(&mut self, event: FaceEvent) -> Response {
        match event {
            FaceEvent::TimeZoneChanged(offset) => self.time.set_zone(offset),
            FaceEvent::InsetsApplied { round } => {
                self.face.apply_shape(self.config.dimensions.for_shape(round))
            }
            _ => {}
        }

        let transition = self.machine.handle(&event);
        if transition.refresh_zone {
            self.time.refresh_zone();
        }
        if let Some(on) = transition.anti_alias {
            self.face.set_anti_alias(on);
        }
        self.face.sync_flags(&self.machine);

        if event.affects_timer() {
            self.update_timer(transition.timer_should_run);
        }
        if event == FaceEvent::Destroy {
            self.scheduler.cancel_token().cancel();
        }

        debug!("display state {:?}", transition.state);
        Response {
            redraw: transition.redraw,
            subscription: transition.subscription,
        }
    }

    /// Handle a redraw timer firing; returns whether to paint
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        let now = self.time.now_ms();
        match self
            .scheduler
            .fire(handle, now, self.machine.timer_should_run())
        {
            TickOutcome::Stale => false,
            TickOutcome::Redraw { .. } => true,
        }
    }

    /// Replace the weather snapshot; returns whether to paint
    pub fn apply_weather(&mut self, snapshot: WeatherSnapshot) -> bool {
        self.weather = snapshot;
        true
    }

    /// Paint the current frame
    pub fn draw<S: Canvas>(&self, canvas: &mut S) -> Result<(), DisplayError> {
        render::render(canvas, &self.face, &self.weather, &self.time.local_now())
    }

    fn update_timer(&mut self, should_run: bool) {
        if should_run {
            self.scheduler.start(self.time.now_ms());
        } else {
            self.scheduler.stop();
        }
    }
}
