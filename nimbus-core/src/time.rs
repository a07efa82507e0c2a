//! Wall-clock time and the local zone
//!
//! The face keeps its own copy of the zone offset. It is refreshed when the
//! face becomes visible and replaced when a zone-change notification
//! arrives, so a zone change while hidden is picked up on the next show.

use chrono::{DateTime, FixedOffset, Utc};

/// Source of UTC wall-clock time
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;
}

/// Source of the system's current zone offset
pub trait ZoneProvider {
    /// Offset of the system zone at this moment
    fn current_offset(&self) -> FixedOffset;
}

/// Current time in the face's zone
pub struct TimeSource<C, Z> {
    clock: C,
    zones: Z,
    offset: FixedOffset,
}

impl<C: Clock, Z: ZoneProvider> TimeSource<C, Z> {
    /// Create a time source, reading the zone once
    pub fn new(clock: C, zones: Z) -> Self {
        let offset = zones.current_offset();
        Self {
            clock,
            zones,
            offset,
        }
    }

    /// Milliseconds since the Unix epoch
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Zone offset currently applied
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Re-read the system zone
    pub fn refresh_zone(&mut self) {
        self.offset = self.zones.current_offset();
    }

    /// Apply a zone from a change notification
    pub fn set_zone(&mut self, offset: FixedOffset) {
        self.offset = offset;
    }

    /// Current local time
    pub fn local_now(&self) -> DateTime<FixedOffset> {
        to_local(self.now_ms(), self.offset)
    }
}

/// Convert epoch milliseconds to local time at `offset`
///
/// Out-of-range timestamps clamp to the epoch.
pub fn to_local(epoch_ms: i64, offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .unwrap_or_default()
        .with_timezone(&offset)
}
