//! Derivation of the day's absolute event instants from raw timings.
//!
//! Each resolution pass rebuilds the full event set from scratch; derivation
//! is a handful of date-plus-time constructions, so there is no incremental
//! state to keep consistent across ticks.

use chrono::{Duration, NaiveDateTime};
use std::fmt;

use crate::constants::IQAMA_OFFSET_MINUTES;
use crate::prayer::{EventKind, Prayer};
use crate::timings::DailyTimings;

/// Which prayer an event belongs to. Tomorrow's Fajr is its own variant so
/// the post-Isha wraparound target carries its identity through to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPrayer {
    Today(Prayer),
    TomorrowFajr,
}

impl EventPrayer {
    /// The prayer name shown to the user; tomorrow's Fajr displays as Fajr.
    pub fn display_name(&self) -> &'static str {
        match self {
            EventPrayer::Today(prayer) => prayer.name(),
            EventPrayer::TomorrowFajr => Prayer::Fajr.name(),
        }
    }
}

impl fmt::Display for EventPrayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One absolute event: a prayer's Adhan or Iqama at a zone-naive instant.
///
/// Instants live in the same wall-clock frame as
/// [`LocationClock::now`](crate::clock::LocationClock::now), so comparisons
/// and subtractions against the current reading need no offset handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInstant {
    pub prayer: EventPrayer,
    pub kind: EventKind,
    pub instant: NaiveDateTime,
}

/// The Iqama instant for an Adhan instant. Fixed offset, never configurable,
/// so the Iqama-minus-Adhan invariant holds unconditionally.
pub fn iqama_instant(adhan: NaiveDateTime) -> NaiveDateTime {
    adhan + Duration::minutes(IQAMA_OFFSET_MINUTES)
}

/// Derive the day's ordered event sequence.
///
/// For each prayer in canonical order, the Adhan instant is `reference_now`'s
/// date carrying the prayer's time-of-day (seconds zero), immediately followed
/// by its Iqama. After Isha comes tomorrow's Fajr pair, built from Fajr's
/// time-of-day on the next civil day, so a reading taken after Isha's Iqama
/// still finds an upcoming event without refetching.
///
/// A prayer with no parsed time is skipped entirely; a missing Fajr also
/// suppresses the tomorrow pair since there is nothing to project forward.
pub fn derive_events(timings: &DailyTimings, reference_now: NaiveDateTime) -> Vec<EventInstant> {
    let today = reference_now.date();
    let mut events = Vec::with_capacity(12);

    for prayer in Prayer::ALL {
        let Some(time) = timings.adhan(prayer) else {
            continue;
        };
        let adhan = today.and_time(time);
        events.push(EventInstant {
            prayer: EventPrayer::Today(prayer),
            kind: EventKind::Adhan,
            instant: adhan,
        });
        events.push(EventInstant {
            prayer: EventPrayer::Today(prayer),
            kind: EventKind::Iqama,
            instant: iqama_instant(adhan),
        });
    }

    if let (Some(fajr), Some(tomorrow)) = (timings.adhan(Prayer::Fajr), today.succ_opt()) {
        let adhan = tomorrow.and_time(fajr);
        events.push(EventInstant {
            prayer: EventPrayer::TomorrowFajr,
            kind: EventKind::Adhan,
            instant: adhan,
        });
        events.push(EventInstant {
            prayer: EventPrayer::TomorrowFajr,
            kind: EventKind::Iqama,
            instant: iqama_instant(adhan),
        });
    }

    events
}
