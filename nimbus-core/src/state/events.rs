//! Host lifecycle events

use chrono::FixedOffset;

/// Events delivered by the host framework to the rendering context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceEvent {
    /// Face shown or hidden
    VisibilityChanged(bool),
    /// Entered or left ambient mode
    AmbientModeChanged(bool),
    /// Device properties reported
    PropertiesChanged {
        /// Display drops colour depth in ambient mode
        low_bit_ambient: bool,
    },
    /// System zone changed
    TimeZoneChanged(FixedOffset),
    /// Once-a-minute tick while ambient
    TimeTick,
    /// Screen shape known
    InsetsApplied {
        /// Round screen
        round: bool,
    },
    /// Engine torn down
    Destroy,
}

impl FaceEvent {
    /// Check if this event can change whether the redraw timer runs
    pub fn affects_timer(&self) -> bool {
        matches!(
            self,
            FaceEvent::VisibilityChanged(_) | FaceEvent::AmbientModeChanged(_) | FaceEvent::Destroy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_events() {
        assert!(FaceEvent::VisibilityChanged(true).affects_timer());
        assert!(FaceEvent::AmbientModeChanged(false).affects_timer());
        assert!(FaceEvent::Destroy.affects_timer());
        assert!(!FaceEvent::TimeTick.affects_timer());
        assert!(!FaceEvent::PropertiesChanged {
            low_bit_ambient: true
        }
        .affects_timer());
    }
}
