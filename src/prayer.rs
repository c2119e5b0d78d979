//! Canonical prayer identifiers and time-of-day parsing.
//!
//! The five daily prayers form a closed set with a fixed order. That order is
//! load-bearing: event derivation emits prayers in this order, and the next-
//! event scan relies on it for its tie-break behavior, so iteration always goes
//! through [`Prayer::ALL`] rather than any string-keyed collection.

use chrono::NaiveTime;
use std::fmt;

/// The five canonical daily prayers, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All prayers in canonical order. Derivation and resolution iterate this.
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// English display name, matching the Aladhan API's timing keys.
    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    /// Stable index into per-prayer arrays.
    pub fn index(&self) -> usize {
        match self {
            Prayer::Fajr => 0,
            Prayer::Dhuhr => 1,
            Prayer::Asr => 2,
            Prayer::Maghrib => 3,
            Prayer::Isha => 4,
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an event marks the call to prayer or the congregational start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Adhan,
    Iqama,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Adhan => f.write_str("Adhān"),
            EventKind::Iqama => f.write_str("Iqāma"),
        }
    }
}

/// Parse a provider time-of-day string into a `NaiveTime` with seconds zeroed.
///
/// The Aladhan API returns timings as `"HH:MM"`, optionally suffixed with a
/// timezone annotation such as `"05:10 (+04)"` or `"05:10 (EET)"`. The suffix
/// is dropped; the wall-clock fields are already expressed in the request
/// coordinates' timezone.
///
/// Returns `None` for anything that does not yield a valid hour/minute pair,
/// so a malformed entry degrades to that prayer being skipped rather than
/// failing the whole day's derivation.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let clock = raw.split_whitespace().next()?;
    let (hour, minute) = clock.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Human-readable name for an Aladhan calculation method id.
///
/// Unknown ids are still forwarded to the provider; this is display-only.
pub fn calculation_method_name(method: u8) -> &'static str {
    match method {
        0 => "Shia Ithna-Ashari",
        1 => "University of Islamic Sciences, Karachi",
        2 => "Islamic Society of North America",
        3 => "Umm al-Qura University, Makkah",
        4 => "Egyptian General Authority of Survey",
        5 => "Institute of Geophysics, University of Tehran",
        7 => "Muslim World League",
        8 => "Gulf Region",
        9 => "Kuwait",
        10 => "Qatar",
        11 => "Singapore",
        12 => "Turkey",
        _ => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let names: Vec<&str> = Prayer::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Fajr", "Dhuhr", "Asr", "Maghrib", "Isha"]);
        for (i, prayer) in Prayer::ALL.iter().enumerate() {
            assert_eq!(prayer.index(), i);
        }
    }

    #[test]
    fn test_parse_plain_clock() {
        assert_eq!(
            parse_time_of_day("05:10"),
            Some(NaiveTime::from_hms_opt(5, 10, 0).unwrap())
        );
        assert_eq!(
            parse_time_of_day("23:59"),
            Some(NaiveTime::from_hms_opt(23, 59, 0).unwrap())
        );
        assert_eq!(
            parse_time_of_day("00:00"),
            Some(NaiveTime::from_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_with_timezone_annotation() {
        assert_eq!(
            parse_time_of_day("19:45 (+04)"),
            Some(NaiveTime::from_hms_opt(19, 45, 0).unwrap())
        );
        assert_eq!(
            parse_time_of_day("04:42 (EET)"),
            Some(NaiveTime::from_hms_opt(4, 42, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(parse_time_of_day(""), None);
        assert_eq!(parse_time_of_day("no-colon"), None);
        assert_eq!(parse_time_of_day("24:00"), None);
        assert_eq!(parse_time_of_day("12:60"), None);
        assert_eq!(parse_time_of_day("xx:10"), None);
        assert_eq!(parse_time_of_day(":"), None);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(
            calculation_method_name(3),
            "Umm al-Qura University, Makkah"
        );
        assert_eq!(calculation_method_name(13), "Other");
        assert_eq!(calculation_method_name(6), "Other");
    }
}
