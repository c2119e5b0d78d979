//! Prayer timings from the Aladhan API.
//!
//! One request per (date, coordinates, method) key:
//! `GET /v1/timings/{dd-MM-yyyy}?latitude=..&longitude=..&method=..`.
//! The response carries every timing as a wall-clock string already expressed
//! in the coordinates' timezone, plus the Hijri calendar date which we keep
//! for the table header.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

use super::{PrayerTimeProvider, TimingsFetch};
use crate::constants::{ALADHAN_TIMINGS_URL, PROVIDER_TIMEOUT_SECS};
use crate::timings::DailyTimings;

pub struct AladhanProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TimingsResponse {
    data: TimingsData,
}

#[derive(Deserialize)]
struct TimingsData {
    timings: RawTimings,
    date: Option<DateInfo>,
}

#[derive(Deserialize)]
struct RawTimings {
    #[serde(rename = "Fajr")]
    fajr: String,
    #[serde(rename = "Dhuhr")]
    dhuhr: String,
    #[serde(rename = "Asr")]
    asr: String,
    #[serde(rename = "Maghrib")]
    maghrib: String,
    #[serde(rename = "Isha")]
    isha: String,
}

#[derive(Deserialize)]
struct DateInfo {
    hijri: Option<HijriDate>,
}

#[derive(Deserialize)]
struct HijriDate {
    day: String,
    month: HijriMonth,
    year: String,
}

#[derive(Deserialize)]
struct HijriMonth {
    en: String,
}

impl AladhanProvider {
    pub fn new() -> Result<Self> {
        Self::with_base_url(ALADHAN_TIMINGS_URL.to_string())
    }

    /// Point the provider at a different endpoint. Exists for tests.
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            .user_agent(concat!("salawat/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for prayer times")?;
        Ok(Self { client, base_url })
    }
}

impl PrayerTimeProvider for AladhanProvider {
    fn fetch(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        method: u8,
    ) -> Result<TimingsFetch> {
        let url = format!("{}/{}", self.base_url, date.format("%d-%m-%Y"));
        let response: TimingsResponse = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("method", method.to_string()),
            ])
            .send()
            .context("Prayer times request failed")?
            .error_for_status()
            .context("Prayer times service returned an error")?
            .json()
            .context("Failed to parse prayer times response")?;

        Ok(parse_fetch(date, response))
    }
}

fn parse_fetch(date: NaiveDate, response: TimingsResponse) -> TimingsFetch {
    let raw = &response.data.timings;
    let timings = DailyTimings::from_raw(
        date,
        [
            raw.fajr.as_str(),
            raw.dhuhr.as_str(),
            raw.asr.as_str(),
            raw.maghrib.as_str(),
            raw.isha.as_str(),
        ],
    );
    let hijri_date = response
        .data
        .date
        .and_then(|d| d.hijri)
        .map(|h| format!("{} {} {}", h.day, h.month.en, h.year));
    TimingsFetch { timings, hijri_date }
}
