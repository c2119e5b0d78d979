//! Application-wide constants.

/// Fixed offset between a prayer's Adhan and its Iqama, in minutes.
pub const IQAMA_OFFSET_MINUTES: i64 = 15;

/// Interval between countdown re-evaluations, in seconds.
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 1;

/// How often the main loop wakes to check for signals and date rollover, in
/// milliseconds. Kept short so Ctrl+C feels immediate.
pub const MAIN_LOOP_POLL_MS: u64 = 250;

/// Default Aladhan calculation method (3 = Umm al-Qura University, Makkah).
pub const DEFAULT_CALCULATION_METHOD: u8 = 3;

/// Highest calculation method id the Aladhan API currently accepts.
pub const MAX_CALCULATION_METHOD: u8 = 13;

/// Aladhan timings endpoint. Completed with `/{dd-MM-yyyy}` plus query
/// parameters for coordinates and method.
pub const ALADHAN_TIMINGS_URL: &str = "https://api.aladhan.com/v1/timings";

/// IP geolocation endpoint used for the startup location fallback.
pub const IP_LOCATION_URL: &str = "https://ipapi.co/json/";

/// Network timeout for provider requests, in seconds.
pub const PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Delay before re-attempting a failed prayer-times fetch, in seconds.
pub const FETCH_RETRY_SECS: u64 = 60;

/// Standard exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
