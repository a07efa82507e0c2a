//! Wall clock and system time zone

use chrono::{FixedOffset, Local, Offset, Utc};

use nimbus_core::{Clock, ZoneProvider};

/// Milliseconds since the Unix epoch from the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Current offset of the system's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalZone;

impl ZoneProvider for LocalZone {
    fn current_offset(&self) -> FixedOffset {
        Local::now().offset().fix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_tracks_utc() {
        let before = Utc::now().timestamp_millis();
        let now = SystemClock.now_ms();
        assert!(now >= before);
        assert!(now - before < 5_000);
    }

    #[test]
    fn test_local_zone_matches_chrono() {
        let offset = LocalZone.current_offset();
        assert!(offset.local_minus_utc().abs() <= 14 * 3600);
    }
}
