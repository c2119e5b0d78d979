//! # Salawat Library
//!
//! Internal library for the salawat binary.
//!
//! This library exists to enable testing of the time-resolution engine and to
//! provide clean separation between CLI dispatch (main.rs) and application
//! logic.
//!
//! ## Architecture
//!
//! - **Engine**: `clock` anchors "now" to the active location's timezone,
//!   `events` derives the day's Adhān/Iqāma instants, `resolver` picks the
//!   next upcoming one, `countdown` formats the remaining time
//! - **Concurrency**: `scheduler` owns the once-per-second tick stream and its
//!   single cancellation handle
//! - **Orchestration**: `session` owns location and timings and sequences
//!   every replacement of them
//! - **Providers**: `providers` holds the location/timezone/prayer-time seams
//!   and their IP, tzf, and Aladhan implementations
//! - **Infrastructure**: `config` for TOML settings, `logger` for structured
//!   output, `time_source` for the injectable clock, `display` for rendering

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod clock;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod display;
pub mod events;
pub mod prayer;
pub mod providers;
pub mod resolver;
pub mod scheduler;
pub mod session;
pub mod time_source;
pub mod timings;

// Re-export the engine surface for the binary and integration tests
pub use clock::LocationClock;
pub use countdown::{DigitLocale, format_countdown, localize_digits};
pub use events::{EventInstant, EventPrayer, derive_events};
pub use prayer::{EventKind, Prayer};
pub use resolver::{countdown_to, next_event, resolve_next};
pub use scheduler::RefreshScheduler;
pub use session::{Session, SessionParams};
pub use timings::DailyTimings;
