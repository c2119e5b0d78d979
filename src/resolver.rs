//! Selection of the next upcoming event from a derived sequence.

use chrono::{Duration, NaiveDateTime};

use crate::events::{EventInstant, EventPrayer, derive_events, iqama_instant};
use crate::prayer::{EventKind, Prayer};
use crate::timings::DailyTimings;

/// Find the next upcoming event: the first in derivation order whose instant
/// is strictly in the future.
///
/// Strict inequality means an event whose instant equals `reference_now` is
/// already passed; at an Adhan boundary the resolver immediately reports that
/// prayer's Iqama instead of flickering on the Adhan itself. Because each
/// Adhan precedes its Iqama in the sequence, the Adhan-to-Iqama window needs
/// no special casing.
///
/// An exhausted scan falls back to tomorrow's Fajr Adhan when the sequence
/// carries one; with a malformed Fajr that pair is absent, and a post-Isha
/// reading would otherwise be handed an already-passed event. Such a sequence
/// resolves `None`, same as an empty one, which callers surface as "timings
/// unavailable". (With the tomorrow pair present the scan never actually
/// exhausts, since those instants are future relative to any same-day
/// reading.)
pub fn resolve_next(
    events: &[EventInstant],
    reference_now: NaiveDateTime,
) -> Option<EventInstant> {
    events
        .iter()
        .find(|event| event.instant > reference_now)
        .or_else(|| {
            events
                .iter()
                .rfind(|e| e.prayer == EventPrayer::TomorrowFajr && e.kind == EventKind::Adhan)
        })
        .copied()
}

/// Countdown to a specific prayer's Adhan or Iqama, independent of which
/// event is globally next. Used for inspecting an arbitrary prayer.
///
/// The instant is computed for `reference_now`'s date; if it has already
/// passed (same strictness as [`resolve_next`]) it rolls forward exactly one
/// civil day rather than refetching tomorrow's timings. Returns `None` when
/// the prayer has no parsed time for the day.
pub fn countdown_to(
    prayer: Prayer,
    kind: EventKind,
    timings: &DailyTimings,
    reference_now: NaiveDateTime,
) -> Option<Duration> {
    let time = timings.adhan(prayer)?;
    let adhan = reference_now.date().and_time(time);
    let mut instant = match kind {
        EventKind::Adhan => adhan,
        EventKind::Iqama => iqama_instant(adhan),
    };
    if instant <= reference_now {
        instant += Duration::days(1);
    }
    Some(instant - reference_now)
}

/// Convenience wrapper running derivation and resolution in one pass, the
/// shape each tick executes.
pub fn next_event(timings: &DailyTimings, reference_now: NaiveDateTime) -> Option<EventInstant> {
    resolve_next(&derive_events(timings, reference_now), reference_now)
}
