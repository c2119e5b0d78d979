//! Top-level session: owns the location, the day's timings, and the tick
//! stream, and coordinates every replacement of them.
//!
//! The ordering invariant lives here: any change of location or date runs
//! cancel-old-tick, then replace-state (clearing the display to an explicit
//! unknown), then fetch, then start-new-tick. A tick computed against the old
//! timezone can therefore never land after the new data does.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration as StdDuration, Instant};

use crate::clock::LocationClock;
use crate::config::Config;
use crate::constants::{
    DEFAULT_TICK_INTERVAL_SECS, FETCH_RETRY_SECS, MAIN_LOOP_POLL_MS,
};
use crate::countdown::format_countdown;
use crate::display::{DayView, NextEventView, PrayerRow, Renderer, TickView};
use crate::events::{derive_events, iqama_instant};
use crate::prayer::{Prayer, calculation_method_name};
use crate::providers::{LocationProvider, PrayerTimeProvider, resolve_timezone};
use crate::resolver::resolve_next;
use crate::scheduler::RefreshScheduler;
use crate::timings::DailyTimings;

/// The active location. Replaced wholesale on update, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Absent between a raw coordinate fix and timezone resolution, or when
    /// resolution failed; the clock then reads system-local time.
    pub timezone_id: Option<String>,
}

/// State shared with the tick worker. Only the session mutates it, always in
/// the cancel/replace/start sequence, so the worker can never observe a
/// half-replaced pair.
struct EngineState {
    clock: LocationClock,
    timings: Option<DailyTimings>,
}

/// Dependencies for building a [`Session`], bundled to keep the constructor
/// signature manageable and the seams injectable in tests.
pub struct SessionParams {
    pub config: Config,
    pub debug_enabled: bool,
    pub location_provider: Box<dyn LocationProvider>,
    pub prayer_provider: Box<dyn PrayerTimeProvider>,
    pub renderer: Arc<dyn Renderer>,
}

pub struct Session {
    config: Config,
    debug_enabled: bool,
    location_provider: Box<dyn LocationProvider>,
    prayer_provider: Box<dyn PrayerTimeProvider>,
    renderer: Arc<dyn Renderer>,
    scheduler: RefreshScheduler,
    state: Arc<Mutex<EngineState>>,
    location: Option<Location>,
    place: Option<String>,
    next_retry: Option<Instant>,
}

impl Session {
    pub fn new(params: SessionParams) -> Self {
        Self {
            config: params.config,
            debug_enabled: params.debug_enabled,
            location_provider: params.location_provider,
            prayer_provider: params.prayer_provider,
            renderer: params.renderer,
            scheduler: RefreshScheduler::new(),
            state: Arc::new(Mutex::new(EngineState {
                clock: LocationClock::system_local(),
                timings: None,
            })),
            location: None,
            place: None,
            next_retry: None,
        }
    }

    /// Run the daemon until SIGINT/SIGTERM.
    pub fn run(mut self) -> Result<()> {
        let terminate = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&terminate))
            .context("Failed to register SIGINT handler")?;
        signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&terminate))
            .context("Failed to register SIGTERM handler")?;

        let location = self.resolve_location()?;
        self.apply_location(location);

        while !terminate.load(Ordering::SeqCst) {
            crate::time_source::sleep(StdDuration::from_millis(MAIN_LOOP_POLL_MS));

            if self.date_rolled_over() {
                log_block_start!("Civil date changed, refreshing prayer times");
                self.refresh();
            } else if self.retry_due() {
                log_block_start!("Retrying prayer times fetch");
                self.refresh();
            }
        }

        self.scheduler.stop();
        crate::logger::write_output("\n");
        log_pipe!();
        log_decorated!("Shutting down");
        log_end!();
        Ok(())
    }

    /// Print one day's table and the current next event, without starting a
    /// tick stream. Backs the `times` subcommand.
    pub fn run_once(mut self, date: Option<chrono::NaiveDate>) -> Result<()> {
        let location = self.resolve_location()?;
        let clock = LocationClock::from_timezone_id(location.timezone_id.as_deref());
        let today = clock.now().date();
        let date = date.unwrap_or(today);

        let fetch = self
            .prayer_provider
            .fetch(
                date,
                location.latitude,
                location.longitude,
                self.config.method(),
            )
            .context("Could not fetch prayer times")?;

        let view = build_day_view(
            &fetch.timings,
            fetch.hijri_date.as_deref(),
            self.place.as_deref(),
            location.timezone_id.as_deref(),
        );
        self.renderer.show_day(&view);

        // A next-event readout only makes sense against today's timings
        if date == today {
            let now = clock.now();
            if let Some(next) = resolve_next(&derive_events(&fetch.timings, now), now) {
                log_block_start!(
                    "Next {}: {} in {}",
                    next.kind,
                    next.prayer,
                    crate::countdown::localize_digits(
                        &format_countdown(next.instant - now),
                        self.config.digit_locale()
                    )
                );
            }
        }
        Ok(())
    }

    /// Determine the active location from config or the IP fallback, along
    /// with its timezone.
    fn resolve_location(&mut self) -> Result<Location> {
        let (latitude, longitude) = match self.config.coordinates() {
            Some((lat, lon)) => {
                log_block_start!("Using configured coordinates ({:.4}, {:.4})", lat, lon);
                (lat, lon)
            }
            None => {
                log_block_start!("Detecting location from IP address");
                let fix = self
                    .location_provider
                    .locate()
                    .context("Could not determine a location")?;
                if let Some(place) = &fix.place {
                    log_indented!("Found {}", place);
                }
                self.place = fix.place;
                (fix.latitude, fix.longitude)
            }
        };

        let timezone_id = match self.config.timezone.clone() {
            Some(id) => Some(id),
            None => match resolve_timezone(latitude, longitude) {
                Some(tz) => Some(tz.name().to_string()),
                None => {
                    log_warning!(
                        "No timezone found for ({:.4}, {:.4}), using system time",
                        latitude,
                        longitude
                    );
                    None
                }
            },
        };
        if self.debug_enabled && let Some(id) = &timezone_id {
            log_debug!("Resolved timezone {}", id);
        }

        Ok(Location {
            latitude,
            longitude,
            timezone_id,
        })
    }

    /// Install a new location: cancel the old tick stream, clear dependent
    /// state to unknown, then fetch and start a fresh stream.
    fn apply_location(&mut self, location: Location) {
        self.scheduler.stop();
        {
            let mut state = self.state.lock().unwrap();
            state.timings = None;
            state.clock = LocationClock::from_timezone_id(location.timezone_id.as_deref());
        }
        self.renderer.show_tick(&TickView { next: None });
        self.location = Some(location);
        self.fetch_and_start();
    }

    /// Re-fetch for the current location (date rollover or retry), with the
    /// same cancel/clear/start ordering as a location change.
    fn refresh(&mut self) {
        self.scheduler.stop();
        self.state.lock().unwrap().timings = None;
        self.renderer.show_tick(&TickView { next: None });
        self.fetch_and_start();
    }

    /// Fetch timings for today in the location's frame, then start ticking.
    ///
    /// The tick stream starts whether or not the fetch succeeded; with no
    /// timings present each tick renders the explicit unavailable state until
    /// the main loop's retry lands.
    fn fetch_and_start(&mut self) {
        let Some(location) = self.location.clone() else {
            return;
        };

        // Today as experienced at the location, not the local machine
        let date = self.state.lock().unwrap().clock.now().date();

        let method = self.config.method();
        log_block_start!(
            "Fetching prayer times ({})",
            calculation_method_name(method)
        );
        match self.prayer_provider.fetch(
            date,
            location.latitude,
            location.longitude,
            method,
        ) {
            Ok(fetch) => {
                if fetch.timings.is_empty() {
                    log_pipe!();
                    log_warning!("Provider returned no usable prayer times");
                    self.next_retry =
                        Some(Instant::now() + StdDuration::from_secs(FETCH_RETRY_SECS));
                } else {
                    let view = build_day_view(
                        &fetch.timings,
                        fetch.hijri_date.as_deref(),
                        self.place.as_deref(),
                        location.timezone_id.as_deref(),
                    );
                    self.renderer.show_day(&view);
                    self.state.lock().unwrap().timings = Some(fetch.timings);
                    self.next_retry = None;
                }
            }
            Err(e) => {
                log_pipe!();
                log_warning!("Failed to fetch prayer times: {e:#}");
                log_indented!("Will retry in {} seconds", FETCH_RETRY_SECS);
                self.next_retry =
                    Some(Instant::now() + StdDuration::from_secs(FETCH_RETRY_SECS));
            }
        }

        let state = Arc::clone(&self.state);
        let renderer = Arc::clone(&self.renderer);
        self.scheduler.start(
            StdDuration::from_secs(DEFAULT_TICK_INTERVAL_SECS),
            move || run_tick(&state, renderer.as_ref()),
        );
    }

    /// True once the location-frame civil date has moved past the fetched
    /// timings' date.
    fn date_rolled_over(&self) -> bool {
        let state = self.state.lock().unwrap();
        match &state.timings {
            Some(timings) => state.clock.now().date() != timings.date,
            None => false,
        }
    }

    fn retry_due(&self) -> bool {
        self.state.lock().unwrap().timings.is_none()
            && self
                .next_retry
                .is_some_and(|at| Instant::now() >= at)
    }
}

/// One pipeline pass: read the location clock, derive, resolve, format.
/// Runs synchronously on the tick worker; never partially executed.
fn run_tick(state: &Mutex<EngineState>, renderer: &dyn Renderer) {
    let view = {
        let state = state.lock().unwrap();
        match &state.timings {
            Some(timings) => {
                let now = state.clock.now();
                let events = derive_events(timings, now);
                match resolve_next(&events, now) {
                    Some(next) => TickView {
                        next: Some(NextEventView {
                            prayer: next.prayer,
                            kind: next.kind,
                            countdown: format_countdown(next.instant - now),
                        }),
                    },
                    None => TickView { next: None },
                }
            }
            None => TickView { next: None },
        }
    };
    renderer.show_tick(&view);
}

/// Assemble the daily table from parsed timings.
pub fn build_day_view(
    timings: &DailyTimings,
    hijri_date: Option<&str>,
    place: Option<&str>,
    timezone_id: Option<&str>,
) -> DayView {
    let rows = Prayer::ALL
        .iter()
        .map(|&prayer| {
            let adhan = timings
                .adhan(prayer)
                .map(|t| timings.date.and_time(t));
            PrayerRow {
                prayer,
                adhan: adhan.map(|dt| dt.format("%H:%M").to_string()),
                iqama: adhan.map(|dt| iqama_instant(dt).format("%H:%M").to_string()),
            }
        })
        .collect();

    DayView {
        date: timings.date,
        hijri_date: hijri_date.map(str::to_string),
        place: place.map(str::to_string),
        timezone: timezone_id.map(str::to_string),
        rows,
    }
}
