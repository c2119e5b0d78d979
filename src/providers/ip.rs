//! IP-based geolocation fallback.
//!
//! Used on startup when no coordinates are configured. Accuracy is city-level
//! at best, which is fine for prayer times; users who care pin coordinates in
//! the config instead.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use super::{LocationFix, LocationProvider};
use crate::constants::{IP_LOCATION_URL, PROVIDER_TIMEOUT_SECS};

pub struct IpLocationProvider {
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct IpApiResponse {
    latitude: f64,
    longitude: f64,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
}

impl IpLocationProvider {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            .user_agent(concat!("salawat/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for IP geolocation")?;
        Ok(Self { client })
    }
}

impl LocationProvider for IpLocationProvider {
    fn locate(&self) -> Result<LocationFix> {
        let response: IpApiResponse = self
            .client
            .get(IP_LOCATION_URL)
            .send()
            .context("IP geolocation request failed")?
            .error_for_status()
            .context("IP geolocation service returned an error")?
            .json()
            .context("Failed to parse IP geolocation response")?;

        let place = join_place(&[
            response.city.as_deref(),
            response.region.as_deref(),
            response.country_name.as_deref(),
        ]);

        Ok(LocationFix {
            latitude: response.latitude,
            longitude: response.longitude,
            place,
        })
    }
}

/// Join the present, non-empty place components with ", ".
fn join_place(parts: &[Option<&str>]) -> Option<String> {
    let joined: Vec<&str> = parts
        .iter()
        .flatten()
        .copied()
        .filter(|s| !s.is_empty())
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined.join(", "))
    }
}
