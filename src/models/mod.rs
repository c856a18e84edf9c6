use serde::Serialize;

/// Timestamp layout used both in records and in the store, always UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One uncorrected sensor triple plus the moment it was taken.
///
/// Lives only for the duration of a single sampling cycle; it is never
/// persisted directly.
#[derive(Debug, Clone)]
pub struct RawReading {
    /// Relative humidity inside the enclosure, percent.
    pub humidity: f64,
    /// Temperature inside the enclosure, °C.
    pub temperature: f64,
    /// Air pressure, hPa.
    pub pressure: f64,
    /// UTC, formatted per [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

/// The unit of persistence: ambient-equivalent values derived from one
/// [`RawReading`]. `ambient_pressure` always equals the raw pressure since
/// the enclosure is vented.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CorrectedRecord {
    #[sqlx(rename = "TimeStamp")]
    pub timestamp: String,
    #[sqlx(rename = "Humidity")]
    pub ambient_humidity: f64,
    #[sqlx(rename = "Temperature")]
    pub ambient_temperature: f64,
    #[sqlx(rename = "Pressure")]
    pub ambient_pressure: f64,
}
