pub mod iio;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("sensor device not found: {}", .0.display())]
    DeviceNotFound(PathBuf),

    #[error("failed to read channel {channel}: {source}")]
    ChannelRead {
        channel: String,
        source: std::io::Error,
    },

    #[error("channel {channel} returned unparsable value {value:?}")]
    Malformed { channel: String, value: String },
}

/// Boundary to the physical climate sensor.
///
/// Reads are synchronous and may block on hardware I/O; the sampling loop
/// assumes they eventually return and imposes no timeout.
pub trait SensorDriver {
    /// Relative humidity in percent.
    fn read_humidity(&mut self) -> Result<f64, DriverError>;

    /// Temperature in °C.
    fn read_temperature(&mut self) -> Result<f64, DriverError>;

    /// Air pressure in hPa.
    fn read_pressure(&mut self) -> Result<f64, DriverError>;

    /// One-line device description, shown once at startup.
    fn banner(&self) -> String;
}
