//! External data providers: location, timezone, and prayer times.
//!
//! The engine only depends on the trait seams here; the concrete
//! implementations (IP geolocation, the Aladhan API, tzf-rs lookup) are the
//! network and dataset glue around it. Provider failures are ordinary
//! `Result`s that the session degrades into explicit "unknown" display
//! states, never a crash.

pub mod aladhan;
pub mod ip;
pub mod timezone;

use anyhow::Result;
use chrono::NaiveDate;

use crate::timings::DailyTimings;

pub use aladhan::AladhanProvider;
pub use ip::IpLocationProvider;
pub use timezone::resolve_timezone;

/// A raw geographic fix, before timezone resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable place name, when the provider offers one.
    pub place: Option<String>,
}

/// Source of the user's coordinates.
pub trait LocationProvider {
    fn locate(&self) -> Result<LocationFix>;
}

/// A fetched day of timings plus display metadata that rides along.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingsFetch {
    pub timings: DailyTimings,
    /// Formatted Hijri date for the table header, e.g. "14 Ramadan 1446".
    pub hijri_date: Option<String>,
}

/// Source of prayer timings for a (date, coordinates, method) key.
pub trait PrayerTimeProvider {
    fn fetch(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        method: u8,
    ) -> Result<TimingsFetch>;
}
