//! Time source for the `Created` and `LastChange` metadata fields.
//!
//! The builder reads the clock exactly once per document, so both fields
//! always carry the same instant. Inject a [`FixedClock`] to make output
//! byte-for-byte reproducible.

use chrono::{Local, NaiveDateTime};

/// Timestamp layout used in `Metadata`: ISO-8601 local time, second
/// precision, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Supplies the local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Format a timestamp the way PAGE metadata expects it.
pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(7, 5, 3, 999)
            .unwrap()
    }

    #[test]
    fn format_drops_fraction_and_offset() {
        assert_eq!(format_timestamp(instant()), "2024-03-09T07:05:03");
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock(instant());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_formats_to_19_chars() {
        let s = format_timestamp(SystemClock.now());
        assert_eq!(s.len(), 19, "got: {s}");
        assert_eq!(&s[10..11], "T");
    }
}
