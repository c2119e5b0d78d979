use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;

use salawat::countdown::format_countdown;
use salawat::events::derive_events;
use salawat::prayer::EventKind;
use salawat::resolver::resolve_next;
use salawat::timings::DailyTimings;

/// Generate a valid minute-of-day value
fn minute_of_day_strategy() -> impl Strategy<Value = u32> {
    0u32..1440
}

fn time_from_minute(minute_of_day: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0).unwrap()
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Timings with increasing Adhan times spaced wider than the Iqama offset,
/// the shape every real day has (no two prayers fall within 15 minutes of
/// each other).
fn increasing_timings_strategy() -> impl Strategy<Value = DailyTimings> {
    (240u32..420, proptest::array::uniform4(20u32..200)).prop_map(|(fajr, gaps)| {
        let mut minute = fajr;
        let mut times = [None; 5];
        times[0] = Some(time_from_minute(minute));
        for (i, gap) in gaps.into_iter().enumerate() {
            minute += gap;
            times[i + 1] = Some(time_from_minute(minute));
        }
        DailyTimings::from_times(base_date(), times)
    })
}

proptest! {
    /// Every derived Iqama is exactly 15 minutes after its Adhan, for any
    /// realistically spaced day of timings.
    #[test]
    fn prop_iqama_offset_is_exact(timings in increasing_timings_strategy()) {
        let reference = base_date().and_hms_opt(12, 0, 0).unwrap();
        let events = derive_events(&timings, reference);
        prop_assert_eq!(events.len(), 12);
        for pair in events.chunks(2) {
            prop_assert_eq!(pair[0].kind, EventKind::Adhan);
            prop_assert_eq!(pair[1].kind, EventKind::Iqama);
            prop_assert_eq!(pair[1].instant - pair[0].instant, Duration::minutes(15));
        }
    }

    /// The resolved next event is never at or before the reference reading,
    /// wherever in the day that reading falls.
    #[test]
    fn prop_next_event_is_strictly_future(
        timings in increasing_timings_strategy(),
        now_minute in minute_of_day_strategy(),
        now_second in 0u32..60,
    ) {
        let reference = base_date()
            .and_time(time_from_minute(now_minute))
            + Duration::seconds(now_second as i64);
        let events = derive_events(&timings, reference);
        let next = resolve_next(&events, reference).unwrap();
        prop_assert!(next.instant > reference);
    }

    /// The resolved event is the earliest future event in the sequence, not
    /// merely some future event.
    #[test]
    fn prop_next_event_is_the_earliest_future(
        timings in increasing_timings_strategy(),
        now_minute in minute_of_day_strategy(),
    ) {
        let reference = base_date().and_time(time_from_minute(now_minute));
        let events = derive_events(&timings, reference);
        let next = resolve_next(&events, reference).unwrap();
        let earliest_future = events
            .iter()
            .filter(|e| e.instant > reference)
            .map(|e| e.instant)
            .min()
            .unwrap();
        prop_assert_eq!(next.instant, earliest_future);
    }

    /// Formatting is clamped, zero-padded, and invertible for durations that
    /// fit in two-digit hours.
    #[test]
    fn prop_format_round_trips(total_seconds in 0i64..360_000) {
        let formatted = format_countdown(Duration::seconds(total_seconds));
        let parts: Vec<i64> = formatted
            .split(':')
            .map(|p| p.parse().unwrap())
            .collect();
        prop_assert_eq!(parts.len(), 3);
        prop_assert!(parts[1] < 60 && parts[2] < 60);
        prop_assert_eq!(parts[0] * 3600 + parts[1] * 60 + parts[2], total_seconds);
        // every field keeps at least two characters
        for part in formatted.split(':') {
            prop_assert!(part.len() >= 2);
        }
    }

    /// Negative durations always clamp to zero.
    #[test]
    fn prop_negative_durations_clamp(total_ms in i64::MIN / 2..0) {
        prop_assert_eq!(
            format_countdown(Duration::milliseconds(total_ms)),
            "00:00:00"
        );
    }
}
