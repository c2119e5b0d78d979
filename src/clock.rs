//! Location-anchored wall clock.
//!
//! A countdown computed in the wrong timezone is off by whole hours, so every
//! "what time is it" read goes through [`LocationClock`], which projects the
//! current instant into the active location's timezone and hands back a
//! zone-naive datetime. All derived event instants are naive datetimes in the
//! same frame, which keeps the arithmetic plain subtraction with no offset
//! bookkeeping.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Wall clock for the active location.
///
/// Holds the resolved timezone, or `None` when no timezone is known yet (a
/// raw coordinate fix before resolution, or a failed lookup). In that state
/// reads fall back to the system-local clock rather than failing; the
/// countdown is then computed against the wrong frame if the location is
/// remote, which mirrors the no-timezone degradation the rest of the pipeline
/// expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationClock {
    tz: Option<Tz>,
}

impl LocationClock {
    /// Clock that reads system-local time.
    pub fn system_local() -> Self {
        Self { tz: None }
    }

    /// Clock anchored to a known timezone.
    pub fn for_timezone(tz: Tz) -> Self {
        Self { tz: Some(tz) }
    }

    /// Build from an IANA timezone identifier, if one is available.
    ///
    /// An unknown identifier logs a warning and falls back to the system-local
    /// clock; it never surfaces an error to the caller.
    pub fn from_timezone_id(timezone_id: Option<&str>) -> Self {
        match timezone_id {
            None => Self::system_local(),
            Some(id) => match id.parse::<Tz>() {
                Ok(tz) => Self::for_timezone(tz),
                Err(_) => {
                    log_warning!(
                        "Unknown timezone identifier {:?}, falling back to system time",
                        id
                    );
                    Self::system_local()
                }
            },
        }
    }

    /// The resolved timezone, if any.
    pub fn timezone(&self) -> Option<Tz> {
        self.tz
    }

    /// Current wall-clock time in the location's frame, as a naive datetime.
    pub fn now(&self) -> NaiveDateTime {
        project(crate::time_source::now_utc(), self.tz)
    }
}

/// Project a UTC instant into a zone's wall-clock fields, dropping the offset.
///
/// Pure so tests can pin the instant instead of installing a global source.
pub fn project(instant: DateTime<Utc>, tz: Option<Tz>) -> NaiveDateTime {
    match tz {
        Some(tz) => tz.from_utc_datetime(&instant.naive_utc()).naive_local(),
        None => instant.with_timezone(&chrono::Local).naive_local(),
    }
}
