//! State machine definition
//!
//! Rendering mode, timer activity and the time-zone subscription are all a
//! function of the visibility and ambient flags plus the low-bit property.

use super::events::FaceEvent;

/// Display states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// Face not on screen
    Invisible,
    /// On screen, ticking every second
    VisibleInteractive,
    /// On screen in low-power mode
    VisibleAmbient,
}

/// Change to the time-zone subscription requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZoneSubscription {
    Unchanged,
    Register,
    Unregister,
}

/// Effects of one transition, applied by the owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State after the transition
    pub state: DisplayState,
    /// Request exactly one redraw
    pub redraw: bool,
    /// Redraw timer should be armed after this transition
    pub timer_should_run: bool,
    /// New anti-alias setting for all text paints, if it changes
    pub anti_alias: Option<bool>,
    /// Re-read the system zone before drawing
    pub refresh_zone: bool,
    /// Subscription change
    pub subscription: ZoneSubscription,
}

/// Tracks the host flags and derives the display state from them
#[derive(Debug, Clone, Default)]
pub struct DisplayStateMachine {
    visible: bool,
    ambient: bool,
    low_bit_ambient: bool,
    /// Anti-aliasing was switched off on ambient entry
    anti_alias_suppressed: bool,
    subscribed: bool,
}

impl DisplayStateMachine {
    /// Create a machine in `Invisible`
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> DisplayState {
        match (self.visible, self.ambient) {
            (false, _) => DisplayState::Invisible,
            (true, false) => DisplayState::VisibleInteractive,
            (true, true) => DisplayState::VisibleAmbient,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn low_bit_ambient(&self) -> bool {
        self.low_bit_ambient
    }

    /// Check if the zone subscription is registered
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// The redraw timer runs only while visible and interactive
    pub fn timer_should_run(&self) -> bool {
        self.state() == DisplayState::VisibleInteractive
    }

    /// Face shown or hidden
    pub fn visibility_changed(&mut self, visible: bool) -> Transition {
        self.visible = visible;
        let subscription = match (visible, self.subscribed) {
            (true, false) => {
                self.subscribed = true;
                ZoneSubscription::Register
            }
            (false, true) => {
                self.subscribed = false;
                ZoneSubscription::Unregister
            }
            _ => ZoneSubscription::Unchanged,
        };

        Transition {
            redraw: visible,
            refresh_zone: visible,
            subscription,
            ..self.transition(false)
        }
    }

    /// Entered or left ambient mode
    ///
    /// The flag is tracked even while hidden so the face comes back in the
    /// right mode. Only an actual change touches anti-aliasing, and only an
    /// actual change while visible repaints.
    pub fn ambient_mode_changed(&mut self, ambient: bool) -> Transition {
        if self.ambient == ambient {
            return self.transition(false);
        }
        self.ambient = ambient;

        let anti_alias = if ambient && self.low_bit_ambient {
            self.anti_alias_suppressed = true;
            Some(false)
        } else if !ambient && self.anti_alias_suppressed {
            self.anti_alias_suppressed = false;
            Some(true)
        } else {
            None
        };

        Transition {
            anti_alias,
            ..self.transition(self.visible)
        }
    }

    /// Low-bit property reported; takes effect on the next ambient entry
    pub fn low_bit_ambient_reported(&mut self, low_bit: bool) -> Transition {
        self.low_bit_ambient = low_bit;
        self.transition(false)
    }

    /// System zone changed; always repaints
    pub fn time_zone_changed(&mut self) -> Transition {
        self.transition(true)
    }

    /// Once-a-minute host tick; repaints only a visible ambient face
    ///
    /// The interactive face already repaints every second.
    pub fn time_tick(&mut self) -> Transition {
        self.transition(self.state() == DisplayState::VisibleAmbient)
    }

    /// Engine torn down: hide and drop the subscription
    pub fn destroy(&mut self) -> Transition {
        let mut transition = self.visibility_changed(false);
        transition.redraw = false;
        transition
    }

    /// Dispatch a lifecycle event
    pub fn handle(&mut self, event: &FaceEvent) -> Transition {
        match *event {
            FaceEvent::VisibilityChanged(visible) => self.visibility_changed(visible),
            FaceEvent::AmbientModeChanged(ambient) => self.ambient_mode_changed(ambient),
            FaceEvent::PropertiesChanged { low_bit_ambient } => {
                self.low_bit_ambient_reported(low_bit_ambient)
            }
            FaceEvent::TimeZoneChanged(_) => self.time_zone_changed(),
            FaceEvent::TimeTick => self.time_tick(),
            FaceEvent::InsetsApplied { .. } => self.transition(false),
            FaceEvent::Destroy => self.destroy(),
        }
    }

    fn transition(&self, redraw: bool) -> Transition {
        Transition {
            state: self.state(),
            redraw,
            timer_should_run: self.timer_should_run(),
            anti_alias: None,
            refresh_zone: false,
            subscription: ZoneSubscription::Unchanged,
        }
    }
}
