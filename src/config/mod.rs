use anyhow::{Context, Result};
use config::{Config, File};
use log::{debug, LevelFilter};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::correction::Calibration;
use crate::sampler::PlausibleBounds;

fn default_interval() -> u64 {
    30
}

fn default_slope() -> f64 {
    0.8542
}

fn default_intercept() -> f64 {
    -9.675
}

fn default_device() -> String {
    "/sys/bus/iio/devices/iio:device0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// The store path is the one setting with no default: without it there is
/// nowhere to log to, so loading fails fast.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SamplingConfig {
    /// Seconds between cycles.
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
        }
    }
}

/// Linear-fit coefficients of the self-heating correction for this
/// enclosure. The defaults are the reference calibration.
#[derive(Debug, Deserialize, Clone)]
pub struct CalibrationConfig {
    #[serde(default = "default_slope")]
    pub slope: f64,
    #[serde(default = "default_intercept")]
    pub intercept: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            slope: default_slope(),
            intercept: default_intercept(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SensorConfig {
    /// Path to the iio sysfs device directory.
    #[serde(default = "default_device")]
    pub device: String,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(rename = "STORE")]
    pub store: StoreConfig,
    #[serde(rename = "SAMPLING", default)]
    pub sampling: SamplingConfig,
    #[serde(rename = "CALIBRATION", default)]
    pub calibration: CalibrationConfig,
    #[serde(rename = "SENSOR", default)]
    pub sensor: SensorConfig,
    #[serde(rename = "LOGGING", default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_file("config.ini")
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(
                File::with_name(config_path.to_str().unwrap_or(""))
                    .format(config::FileFormat::Ini),
            )
            .build()
            .context(format!(
                "Failed to load config from {}",
                config_path.display()
            ))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        Ok(app_config)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.sampling.interval)
    }

    pub fn calibration(&self) -> Calibration {
        Calibration {
            slope: self.calibration.slope,
            intercept: self.calibration.intercept,
        }
    }

    /// Plausibility bounds for raw readings. Fixed for now; kept here so the
    /// sampling component takes everything it needs from one place.
    pub fn plausible_bounds(&self) -> PlausibleBounds {
        PlausibleBounds::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config_applies_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = "[STORE]\npath = \"/var/lib/climatelog/climate.db\"\n";

        temp_file.write_all(config_content.as_bytes()).unwrap();
        let config = AppConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.store.path, "/var/lib/climatelog/climate.db");
        assert_eq!(config.sampling.interval, 30);
        assert_eq!(config.calibration.slope, 0.8542);
        assert_eq!(config.calibration.intercept, -9.675);
        assert_eq!(config.sensor.device, "/sys/bus/iio/devices/iio:device0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_store_path_fails() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = "[SAMPLING]\ninterval = 10\n";

        temp_file.write_all(config_content.as_bytes()).unwrap();
        assert!(AppConfig::from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_full_config_overrides_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = "[STORE]\npath = \"test.db\"\n\n[SAMPLING]\ninterval = 60\n\n[CALIBRATION]\nslope = 0.9\nintercept = -5.5\n\n[SENSOR]\ndevice = \"/sys/bus/iio/devices/iio:device2\"\n\n[LOGGING]\nlevel = \"debug\"\n";

        temp_file.write_all(config_content.as_bytes()).unwrap();
        let config = AppConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.store.path, "test.db");
        assert_eq!(config.sampling.interval, 60);
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(config.calibration.slope, 0.9);
        assert_eq!(config.calibration.intercept, -5.5);
        assert_eq!(config.sensor.device, "/sys/bus/iio/devices/iio:device2");
        assert_eq!(config.get_log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_log_level_falls_back_to_info() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = "[STORE]\npath = \"test.db\"\n\n[LOGGING]\nlevel = \"loud\"\n";

        temp_file.write_all(config_content.as_bytes()).unwrap();
        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.get_log_level(), LevelFilter::Info);
    }
}
