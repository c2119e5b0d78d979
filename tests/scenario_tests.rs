//! End-to-end scenarios through the public engine surface, including the
//! timezone projection step the daemon performs before every resolution pass.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use salawat::clock::project;
use salawat::config::Config;
use salawat::display::{DayView, Renderer, TickView};
use salawat::events::{EventPrayer, derive_events};
use salawat::prayer::{EventKind, Prayer};
use salawat::providers::{
    LocationFix, LocationProvider, PrayerTimeProvider, TimingsFetch,
};
use salawat::resolver::resolve_next;
use salawat::session::{Session, SessionParams};
use salawat::timings::DailyTimings;

fn dubai_timings() -> DailyTimings {
    DailyTimings::from_raw(
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        ["05:10", "12:26", "15:47", "18:25", "19:45"],
    )
}

/// Scenario A: at exactly 05:10:00 Dubai wall-clock time, the next event is
/// Fajr's Iqama at 05:25:00, resolved against a clock anchored to Asia/Dubai.
#[test]
fn test_scenario_dubai_fajr_boundary() {
    // 01:10 UTC is 05:10 in Dubai (UTC+4, no DST)
    let utc_instant = NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(1, 10, 0)
        .unwrap()
        .and_utc();
    let now: NaiveDateTime = project(utc_instant, Some(chrono_tz::Asia::Dubai));
    assert_eq!(
        now,
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(5, 10, 0)
            .unwrap()
    );

    let timings = dubai_timings();
    let events = derive_events(&timings, now);
    let next = resolve_next(&events, now).unwrap();
    assert_eq!(next.prayer, EventPrayer::Today(Prayer::Fajr));
    assert_eq!(next.kind, EventKind::Iqama);
    assert_eq!(
        next.instant,
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(5, 25, 0)
            .unwrap()
    );
}

/// Scenario B: one second past Isha's Iqama (19:45 + 15min = 20:00), the next
/// event wraps to tomorrow's Fajr Adhan on the next civil date.
#[test]
fn test_scenario_post_isha_wraparound() {
    let now = NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(20, 0, 1)
        .unwrap();
    let timings = dubai_timings();
    let next = resolve_next(&derive_events(&timings, now), now).unwrap();
    assert_eq!(next.prayer, EventPrayer::TomorrowFajr);
    assert_eq!(next.kind, EventKind::Adhan);
    assert_eq!(
        next.instant,
        NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_hms_opt(5, 10, 0)
            .unwrap()
    );
}

// Stub providers for exercising the session without a network.

struct FixedLocation;

impl LocationProvider for FixedLocation {
    fn locate(&self) -> Result<LocationFix> {
        Ok(LocationFix {
            latitude: 25.2048,
            longitude: 55.2708,
            place: Some("Dubai, United Arab Emirates".to_string()),
        })
    }
}

struct FixedTimings;

impl PrayerTimeProvider for FixedTimings {
    fn fetch(
        &self,
        date: NaiveDate,
        _latitude: f64,
        _longitude: f64,
        _method: u8,
    ) -> Result<TimingsFetch> {
        Ok(TimingsFetch {
            timings: DailyTimings::from_raw(
                date,
                ["05:10", "12:26", "15:47", "18:25", "19:45"],
            ),
            hijri_date: Some("14 Ramadan 1446".to_string()),
        })
    }
}

#[derive(Default)]
struct CapturingRenderer {
    days: Mutex<Vec<DayView>>,
    ticks: Mutex<Vec<TickView>>,
}

impl Renderer for CapturingRenderer {
    fn show_day(&self, view: &DayView) {
        self.days.lock().unwrap().push(view.clone());
    }

    fn show_tick(&self, view: &TickView) {
        self.ticks.lock().unwrap().push(view.clone());
    }
}

/// A one-shot run against stub providers resolves the IP fix, the Dubai
/// timezone for its coordinates, and renders a full table.
#[test]
fn test_run_once_renders_full_day() {
    salawat::logger::Log::set_enabled(false);
    let renderer = Arc::new(CapturingRenderer::default());
    let session = Session::new(SessionParams {
        config: Config::default(),
        debug_enabled: false,
        location_provider: Box::new(FixedLocation),
        prayer_provider: Box::new(FixedTimings),
        renderer: renderer.clone(),
    });

    let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    session.run_once(Some(date)).unwrap();
    salawat::logger::Log::set_enabled(true);

    let days = renderer.days.lock().unwrap();
    assert_eq!(days.len(), 1);
    let view = &days[0];
    assert_eq!(view.date, date);
    assert_eq!(view.hijri_date.as_deref(), Some("14 Ramadan 1446"));
    assert_eq!(view.place.as_deref(), Some("Dubai, United Arab Emirates"));
    assert_eq!(view.timezone.as_deref(), Some("Asia/Dubai"));
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.rows[0].adhan.as_deref(), Some("05:10"));
    assert_eq!(view.rows[0].iqama.as_deref(), Some("05:25"));
}
