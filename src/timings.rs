//! Daily prayer timings as delivered by a prayer-time provider.

use chrono::{NaiveDate, NaiveTime};

use crate::prayer::{Prayer, parse_time_of_day};

/// One civil day's Adhan times for a location.
///
/// Immutable once built; replaced wholesale whenever the location or the
/// target date changes. A prayer whose provider string failed to parse is
/// simply absent, which downstream derivation treats as "skip this prayer's
/// events" rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTimings {
    /// The civil date these timings describe, in the location's timezone.
    pub date: NaiveDate,
    adhan: [Option<NaiveTime>; 5],
}

impl DailyTimings {
    /// Build from raw provider strings, parsing each prayer independently.
    ///
    /// `raw` is indexed by [`Prayer::index`]. Malformed entries are logged and
    /// dropped so one bad field never discards the rest of the day.
    pub fn from_raw(date: NaiveDate, raw: [&str; 5]) -> Self {
        let mut adhan = [None; 5];
        for prayer in Prayer::ALL {
            let value = raw[prayer.index()];
            match parse_time_of_day(value) {
                Some(time) => adhan[prayer.index()] = Some(time),
                None => {
                    log_warning!(
                        "Unparseable {} time {:?} from provider, skipping",
                        prayer,
                        value
                    );
                }
            }
        }
        Self { date, adhan }
    }

    /// Build from already-parsed times. Used by tests and by providers that
    /// validate upstream.
    pub fn from_times(date: NaiveDate, adhan: [Option<NaiveTime>; 5]) -> Self {
        Self { date, adhan }
    }

    /// The Adhan time-of-day for a prayer, if the provider supplied one.
    pub fn adhan(&self, prayer: Prayer) -> Option<NaiveTime> {
        self.adhan[prayer.index()]
    }

    /// True if no prayer parsed at all, meaning there is nothing to derive.
    pub fn is_empty(&self) -> bool {
        self.adhan.iter().all(|t| t.is_none())
    }
}
