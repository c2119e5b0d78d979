//! Time source abstraction behind a process-global handle.
//!
//! All current-time reads and sleeps in the daemon go through this module so
//! tests can install a fixed source and exercise time-dependent logic
//! deterministically. The real source is installed lazily on first use.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration as StdDuration;

/// Global time source instance, defaults to `RealTimeSource`
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations.
pub trait TimeSource: Send + Sync {
    /// Get the current instant in UTC. Timezone projection happens in
    /// [`crate::clock::LocationClock`], which is why this is UTC and not a
    /// local or zone-naive value.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Sleep for the specified duration.
    fn sleep(&self, duration: StdDuration);
}

/// Real-time implementation that uses actual system time.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }
}

/// Fixed time source for deterministic tests. Sleeps return immediately.
pub struct FixedTimeSource {
    instant: DateTime<Utc>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now_utc(&self) -> DateTime<Utc> {
        self.instant
    }

    fn sleep(&self, _duration: StdDuration) {}
}

/// Initialize the global time source (call once at startup).
/// A second call is ignored; the first installed source wins.
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Get the current UTC instant from the global time source.
pub fn now_utc() -> DateTime<Utc> {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .now_utc()
}

/// Sleep for the specified duration using the global time source.
pub fn sleep(duration: StdDuration) {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .sleep(duration)
}
