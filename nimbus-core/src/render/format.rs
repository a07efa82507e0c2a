//! Text formatting for the three rows

use core::fmt::Write;

use chrono::{Datelike, Timelike};
use heapless::String;

/// Capacity of the time row
pub const TIME_TEXT_LEN: usize = 8;
/// Capacity of the date row
pub const DATE_TEXT_LEN: usize = 24;
/// Capacity of the temperature row
pub const TEMP_TEXT_LEN: usize = 64;

const WEEKDAYS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];
const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// `H:MM` or `H:MM:SS` with a 12-hour clock starting at 0
pub fn format_time<T: Timelike>(now: &T, with_seconds: bool) -> String<TIME_TEXT_LEN> {
    let mut out = String::new();
    let hour = now.hour() % 12;
    // Capacity fits the longest output
    let _ = if with_seconds {
        write!(out, "{}:{:02}:{:02}", hour, now.minute(), now.second())
    } else {
        write!(out, "{}:{:02}", hour, now.minute())
    };
    out
}

/// Upper-cased `EEE, MMM d yyyy`, e.g. `FRI, OCT 16 2026`
pub fn format_date<D: Datelike>(now: &D) -> String<DATE_TEXT_LEN> {
    let mut out = String::new();
    let weekday = WEEKDAYS[now.weekday().num_days_from_monday() as usize];
    let month = MONTHS[now.month0() as usize];
    let _ = write!(out, "{}, {} {} {:04}", weekday, month, now.day(), now.year());
    out
}

/// `{max}° {min}°` with the values printed as stored
///
/// Uses round-trip float formatting, so whole numbers keep their `.0`.
pub fn format_temperature(max_temp: f64, min_temp: f64) -> String<TEMP_TEXT_LEN> {
    let mut out = String::new();
    let _ = write!(out, "{:?}\u{00B0} {:?}\u{00B0}", max_temp, min_temp);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_time_interactive() {
        assert_eq!(format_time(&at(9, 5, 7), true).as_str(), "9:05:07");
        assert_eq!(format_time(&at(23, 59, 59), true).as_str(), "11:59:59");
    }

    #[test]
    fn test_time_ambient() {
        assert_eq!(format_time(&at(14, 30, 45), false).as_str(), "2:30");
    }

    #[test]
    fn test_noon_and_midnight_are_zero() {
        assert_eq!(format_time(&at(0, 0, 0), false).as_str(), "0:00");
        assert_eq!(format_time(&at(12, 1, 0), false).as_str(), "0:01");
    }

    #[test]
    fn test_date() {
        assert_eq!(format_date(&at(8, 0, 0)).as_str(), "FRI, OCT 16 2026");

        let new_year = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        assert_eq!(format_date(&new_year).as_str(), "FRI, JAN 1 2027");
    }

    #[test]
    fn test_date_uses_calendar_year() {
        // Week-based year would already be 2030 here
        let eve = NaiveDate::from_ymd_opt(2029, 12, 31).unwrap();
        assert_eq!(format_date(&eve).as_str(), "MON, DEC 31 2029");
    }

    #[test]
    fn test_temperature_verbatim() {
        assert_eq!(format_temperature(72.5, 58.0).as_str(), "72.5° 58.0°");
        assert_eq!(format_temperature(-3.25, 0.0).as_str(), "-3.25° 0.0°");
        assert_eq!(format_temperature(0.1, 21.333).as_str(), "0.1° 21.333°");
    }

    #[test]
    fn test_temperature_extremes_fit() {
        let text = format_temperature(f64::MIN_POSITIVE, -f64::MAX);
        assert!(text.ends_with('\u{00B0}'));
        assert_eq!(format_temperature(f64::NAN, f64::INFINITY).as_str(), "NaN° inf°");
    }
}
