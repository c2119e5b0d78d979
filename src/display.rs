//! Renderer seam and terminal implementation.
//!
//! The engine produces two kinds of output: a daily table when timings are
//! (re)fetched, and a compact countdown view once per tick. Both go through
//! the [`Renderer`] trait so tests can capture them and the engine never
//! touches the terminal directly.

use chrono::NaiveDate;

use crate::countdown::{DigitLocale, localize_digits};
use crate::events::EventPrayer;
use crate::prayer::{EventKind, Prayer};

/// One row of the daily table, pre-formatted as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerRow {
    pub prayer: Prayer,
    /// `None` when the provider string for this prayer failed to parse.
    pub adhan: Option<String>,
    pub iqama: Option<String>,
}

/// The daily table shown once per fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date: NaiveDate,
    pub hijri_date: Option<String>,
    pub place: Option<String>,
    pub timezone: Option<String>,
    pub rows: Vec<PrayerRow>,
}

/// The per-tick countdown. `next` is `None` in the explicit "unknown" state:
/// before the first fetch, after a location change clears state, or when the
/// provider failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickView {
    pub next: Option<NextEventView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextEventView {
    pub prayer: EventPrayer,
    pub kind: EventKind,
    pub countdown: String,
}

/// Consumer of engine output.
pub trait Renderer: Send + Sync {
    fn show_day(&self, view: &DayView);
    fn show_tick(&self, view: &TickView);
}

/// Renders to stdout: the table through the logging macros, the countdown as
/// an in-place line rewritten each second.
pub struct TerminalRenderer {
    locale: DigitLocale,
}

impl TerminalRenderer {
    pub fn new(locale: DigitLocale) -> Self {
        Self { locale }
    }
}

impl Renderer for TerminalRenderer {
    fn show_day(&self, view: &DayView) {
        let date = view.date.format("%A, %-d %B %Y").to_string();
        match &view.hijri_date {
            Some(hijri) => log_block_start!("Prayer times for {} ({})", date, hijri),
            None => log_block_start!("Prayer times for {}", date),
        }
        if let Some(place) = &view.place {
            log_indented!("Location: {}", place);
        }
        if let Some(tz) = &view.timezone {
            log_indented!("Timezone: {}", tz);
        }
        log_pipe!();
        for row in &view.rows {
            let adhan = self.time_cell(row.adhan.as_deref());
            let iqama = self.time_cell(row.iqama.as_deref());
            log_indented!("{:<8} Adhān {}   Iqāma {}", row.prayer.name(), adhan, iqama);
        }
    }

    fn show_tick(&self, view: &TickView) {
        let line = match &view.next {
            Some(next) => format!(
                "\r\x1b[2KNext {}: \x1b[1m{}\x1b[0m in {}",
                next.kind,
                next.prayer,
                localize_digits(&next.countdown, self.locale)
            ),
            None => "\r\x1b[2KPrayer times unavailable".to_string(),
        };
        crate::logger::write_output(&line);
    }
}

impl TerminalRenderer {
    fn time_cell(&self, time: Option<&str>) -> String {
        match time {
            Some(t) => localize_digits(t, self.locale),
            None => "--:--".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_cell_localizes_and_defaults() {
        let latin = TerminalRenderer::new(DigitLocale::Latin);
        assert_eq!(latin.time_cell(Some("05:10")), "05:10");
        assert_eq!(latin.time_cell(None), "--:--");

        let arabic = TerminalRenderer::new(DigitLocale::ArabicIndic);
        assert_eq!(arabic.time_cell(Some("05:10")), "٠٥:١٠");
    }
}
