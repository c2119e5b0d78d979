//! Coordinate-to-timezone resolution via the bundled tzf dataset.
//!
//! No network involved: tzf-rs ships timezone boundary data, so resolution is
//! a pure lookup. Coordinates in international waters or with a name chrono-tz
//! does not know resolve to `None`, which the caller degrades to system-local
//! time.

use chrono_tz::Tz;
use once_cell::sync::Lazy;
use tzf_rs::DefaultFinder;

// The finder parses its embedded dataset on first use; keep one for the
// process lifetime
static FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// Resolve the IANA timezone for a coordinate pair.
pub fn resolve_timezone(latitude: f64, longitude: f64) -> Option<Tz> {
    // tzf-rs takes (lng, lat) order
    let name = FINDER.get_tz_name(longitude, latitude);
    if name.is_empty() {
        return None;
    }
    name.parse::<Tz>().ok()
}
