//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! fasting-config.toml file. It provides a centralized way to configure the
//! observer location, the solar angle set, the Hijri anchor, and push
//! settings.
//!
//! The webhook address is deliberately *not* part of the file: it is a
//! deployment secret sourced from the `TRMNL_WEBHOOK` environment variable,
//! and its absence is fatal before any computation starts.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the TRMNL webhook URL.
pub const WEBHOOK_ENV: &str = "TRMNL_WEBHOOK";

/// Errors raised while resolving startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configured time-zone name is not in the IANA database.
    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),

    /// A required environment variable is absent.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// Application configuration loaded from fasting-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Observer location and time zone
    pub location: LocationConfig,
    /// Solar angle set driving the event table
    pub angles: AngleConfig,
    /// Hijri calendar anchor
    pub calendar: CalendarConfig,
    /// Webhook push settings
    pub push: PushConfig,
}

/// Fixed observer location. Constant for the process lifetime.
#[derive(Debug, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Latitude in degrees (north positive)
    pub latitude: f64,
    /// Longitude in degrees (east positive)
    pub longitude: f64,
    /// IANA time-zone name (e.g. "Europe/Berlin")
    pub timezone: String,
}

/// Target solar altitudes and derivation factors for the event table.
///
/// These are configuration constants, never derived at runtime.
#[derive(Debug, Deserialize, Serialize)]
pub struct AngleConfig {
    /// Sun depression in degrees below the horizon for the dawn marker
    pub dawn_angle: f64,
    /// Sun altitude in degrees defining sunrise and the sunset marker
    pub horizon_altitude: f64,
    /// Shadow-length factor for the early-afternoon marker
    pub asr_factor_start: f64,
    /// Shadow-length factor for the late-afternoon marker
    pub asr_factor_end: f64,
    /// Fraction of the night at which the midpoint interval opens
    pub nisf_start_ratio: f64,
    /// Fraction of the night at which the midpoint interval closes
    pub nisf_end_ratio: f64,
}

/// Anchor tying the Hijri label to one known Gregorian date.
///
/// The anchor date is day 1 of the anchor month. The label is a linear
/// day-count offset from this date, not a real lunar computation, so it is
/// only meaningful near the anchor.
#[derive(Debug, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Gregorian date of day 1 of the anchor month (quoted ISO date)
    pub anchor_date: NaiveDate,
    /// Anchor month number, 1-12 (9 = Ramadan)
    pub anchor_month: u32,
    /// Hijri year at the anchor date
    pub anchor_year: i32,
}

/// Outbound webhook settings (address comes from the environment).
#[derive(Debug, Deserialize, Serialize)]
pub struct PushConfig {
    /// Request timeout in seconds for the single POST
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: LocationConfig {
                latitude: 50.1109,
                longitude: 8.6821,
                timezone: "Europe/Berlin".to_string(),
            },
            angles: AngleConfig {
                dawn_angle: 13.23,
                horizon_altitude: -1.4,
                asr_factor_start: 0.356,
                asr_factor_end: 2.299,
                nisf_start_ratio: 0.552,
                nisf_end_ratio: 0.641333,
            },
            calendar: CalendarConfig {
                // 1 Ramadan 1447 AH
                anchor_date: NaiveDate::from_ymd_opt(2026, 2, 17)
                    .expect("anchor date is a valid calendar date"),
                anchor_month: 9,
                anchor_year: 1447,
            },
            push: PushConfig { timeout_secs: 10 },
        }
    }
}

impl Config {
    /// Load configuration from fasting-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("fasting-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    log::info!(
                        "loaded configuration for {} ({}, {})",
                        config.location.timezone,
                        config.location.latitude,
                        config.location.longitude
                    );
                    config
                }
                Err(e) => {
                    log::warn!("invalid config file format: {}", e);
                    log::warn!("using default configuration (Frankfurt)");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no config file found, using default configuration (Frankfurt)");
                Self::default()
            }
        }
    }

    /// Parse the configured time-zone name.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.location
            .timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimeZone(self.location.timezone.clone()))
    }
}

/// Read the webhook URL from the environment. Absence is fatal at startup.
pub fn webhook_url() -> Result<String, ConfigError> {
    env::var(WEBHOOK_ENV).map_err(|_| ConfigError::MissingEnv(WEBHOOK_ENV))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.location.latitude, 50.1109);
        assert_eq!(config.location.longitude, 8.6821);
        assert_eq!(config.location.timezone, "Europe/Berlin");
        assert_eq!(config.angles.dawn_angle, 13.23);
        assert_eq!(config.calendar.anchor_month, 9);
        assert_eq!(config.calendar.anchor_year, 1447);
        assert_eq!(config.push.timeout_secs, 10);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.location.latitude, parsed.location.latitude);
        assert_eq!(config.angles.nisf_end_ratio, parsed.angles.nisf_end_ratio);
        assert_eq!(config.calendar.anchor_date, parsed.calendar.anchor_date);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.location.timezone, "Europe/Berlin");
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml at all [[[").unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.location.latitude, 50.1109);
    }

    #[test]
    fn test_timezone_parses() {
        let config = Config::default();
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_webhook_url_requires_the_environment() {
        // Both cases in one test so parallel tests never race on the var
        std::env::remove_var(WEBHOOK_ENV);
        assert!(matches!(
            webhook_url(),
            Err(ConfigError::MissingEnv(WEBHOOK_ENV))
        ));

        std::env::set_var(WEBHOOK_ENV, "https://example.invalid/hook");
        assert_eq!(webhook_url().unwrap(), "https://example.invalid/hook");
        std::env::remove_var(WEBHOOK_ENV);
    }

    #[test]
    fn test_unknown_timezone_is_an_error() {
        let mut config = Config::default();
        config.location.timezone = "Atlantis/Nowhere".to_string();
        assert!(matches!(
            config.timezone(),
            Err(ConfigError::UnknownTimeZone(_))
        ));
    }
}
