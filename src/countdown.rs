//! Countdown rendering as a clamped, zero-padded `HH:MM:SS` string.

use chrono::Duration;

/// Digit script used when rendering the countdown and prayer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigitLocale {
    #[default]
    Latin,
    /// Arabic-Indic digits (U+0660..U+0669)
    ArabicIndic,
}

/// Format a duration as `HH:MM:SS`.
///
/// Zero and negative durations clamp to `00:00:00`; the renderer may observe a
/// reading taken a beat before the instant it displays against, and a negative
/// countdown would be nonsense on screen. Fields come from integer division
/// and modulo over total milliseconds, so hours keep growing past 99 rather
/// than wrapping.
pub fn format_countdown(duration: Duration) -> String {
    let total_ms = duration.num_milliseconds().max(0);
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Substitute ASCII digits per the locale, leaving every other character
/// (separators included) untouched. Field widths never change: the
/// substitution is one character for one character.
pub fn localize_digits(formatted: &str, locale: DigitLocale) -> String {
    match locale {
        DigitLocale::Latin => formatted.to_string(),
        DigitLocale::ArabicIndic => formatted
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
                None => c,
            })
            .collect(),
    }
}
