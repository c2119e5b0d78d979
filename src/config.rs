//! TOML configuration with validation and default generation.
//!
//! Configuration lives at `$XDG_CONFIG_HOME/salawat/salawat.toml` (or the
//! directory given by `--config-dir`). All fields are optional: with no file
//! and no overrides, location comes from the IP bootstrap and everything else
//! takes defaults.
//!
//! ```toml
//! #[Location]
//! latitude = 25.2048      # Geographic latitude (-90 to 90)
//! longitude = 55.2708     # Geographic longitude (-180 to 180)
//! timezone = "Asia/Dubai" # IANA timezone override (optional)
//!
//! #[Prayer times]
//! method = 3              # Aladhan calculation method id (0-13)
//!
//! #[Display]
//! digits = "latin"        # Digit script: "latin" or "arabic"
//! ```

use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::constants::{DEFAULT_CALCULATION_METHOD, MAX_CALCULATION_METHOD};
use crate::countdown::DigitLocale;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow!("Configuration directory already set"))
}

/// User configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Fixed latitude. When set together with `longitude`, the IP-based
    /// location bootstrap is skipped entirely.
    pub latitude: Option<f64>,
    /// Fixed longitude, paired with `latitude`.
    pub longitude: Option<f64>,
    /// IANA timezone identifier overriding coordinate-based resolution.
    pub timezone: Option<String>,
    /// Aladhan calculation method id (0-13). Defaults to Umm al-Qura.
    pub method: Option<u8>,
    /// Digit script for the countdown and prayer table: "latin" or "arabic".
    pub digits: Option<String>,
}

impl Config {
    /// Load configuration, creating a commented default file if none exists.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            create_default_config(&path)?;
            log_indented!("Created default config at {}", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate ranges and cross-field requirements.
    pub fn validate(&self) -> Result<()> {
        if let Some(lat) = self.latitude
            && !(-90.0..=90.0).contains(&lat)
        {
            return Err(anyhow!("latitude must be between -90 and 90, got {lat}"));
        }
        if let Some(lon) = self.longitude
            && !(-180.0..=180.0).contains(&lon)
        {
            return Err(anyhow!("longitude must be between -180 and 180, got {lon}"));
        }
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(anyhow!(
                "latitude and longitude must be configured together"
            ));
        }
        if let Some(method) = self.method
            && method > MAX_CALCULATION_METHOD
        {
            return Err(anyhow!(
                "method must be between 0 and {MAX_CALCULATION_METHOD}, got {method}"
            ));
        }
        if let Some(tz) = &self.timezone {
            // An explicit override with a typo is a config error, unlike a
            // failed runtime lookup which degrades to local time
            tz.parse::<Tz>()
                .map_err(|_| anyhow!("unknown timezone identifier {tz:?}"))?;
        }
        if let Some(digits) = &self.digits
            && digits != "latin"
            && digits != "arabic"
        {
            return Err(anyhow!(
                "digits must be \"latin\" or \"arabic\", got {digits:?}"
            ));
        }
        Ok(())
    }

    /// Effective calculation method id.
    pub fn method(&self) -> u8 {
        self.method.unwrap_or(DEFAULT_CALCULATION_METHOD)
    }

    /// Effective digit locale.
    pub fn digit_locale(&self) -> DigitLocale {
        match self.digits.as_deref() {
            Some("arabic") => DigitLocale::ArabicIndic,
            _ => DigitLocale::Latin,
        }
    }

    /// Manual coordinates, when both are configured.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Resolve the path of `salawat.toml`.
pub fn config_path() -> Result<PathBuf> {
    if let Some(Some(dir)) = CONFIG_DIR.get() {
        return Ok(dir.join("salawat.toml"));
    }
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("salawat").join("salawat.toml"))
}

fn create_default_config(path: &PathBuf) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let contents = r#"#[Location]
# Leave latitude/longitude unset to detect your location from your IP address.
#latitude = 25.2048       # Geographic latitude (-90 to 90)
#longitude = 55.2708      # Geographic longitude (-180 to 180)
#timezone = "Asia/Dubai"  # IANA timezone override (optional)

#[Prayer times]
method = 3                # Aladhan calculation method id (0-13)

#[Display]
digits = "latin"          # Digit script: "latin" or "arabic"
"#;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Config {
        toml::from_str(contents).unwrap()
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = parse("");
        assert!(config.validate().is_ok());
        assert_eq!(config.method(), DEFAULT_CALCULATION_METHOD);
        assert_eq!(config.digit_locale(), DigitLocale::Latin);
        assert!(config.coordinates().is_none());
    }

    #[test]
    fn test_full_config_round_trip() {
        let config = parse(
            r#"
            latitude = 25.2048
            longitude = 55.2708
            timezone = "Asia/Dubai"
            method = 8
            digits = "arabic"
            "#,
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.coordinates(), Some((25.2048, 55.2708)));
        assert_eq!(config.method(), 8);
        assert_eq!(config.digit_locale(), DigitLocale::ArabicIndic);
    }

    #[test]
    fn test_latitude_out_of_range() {
        let config = parse("latitude = 91.0\nlongitude = 0.0");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_longitude_out_of_range() {
        let config = parse("latitude = 0.0\nlongitude = -181.0");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_coordinates_must_pair() {
        assert!(parse("latitude = 10.0").validate().is_err());
        assert!(parse("longitude = 10.0").validate().is_err());
    }

    #[test]
    fn test_method_out_of_range() {
        assert!(parse("method = 14").validate().is_err());
        assert!(parse("method = 13").validate().is_ok());
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        assert!(parse(r#"timezone = "Mars/Olympus""#).validate().is_err());
    }

    #[test]
    fn test_unknown_digit_script_rejected() {
        assert!(parse(r#"digits = "roman""#).validate().is_err());
    }

    #[test]
    fn test_default_config_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salawat.toml");
        create_default_config(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let config: Config = toml::from_str(&contents).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.method(), 3);
    }
}
