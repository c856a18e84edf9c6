use thiserror::Error;

/// Failure modes of a sampling cycle, from raw read to persisted record.
#[derive(Debug, Error)]
pub enum ClimateError {
    /// A value handed to a correction model lies outside the model's
    /// defined validity domain. Never clamped silently.
    #[error("invalid input: {quantity} = {value} ({constraint})")]
    InvalidInput {
        quantity: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// A raw reading is outside physically plausible bounds, which points
    /// at a sensor fault rather than an unusual climate.
    #[error("sensor out of range: {quantity} = {value} not within [{min}, {max}]")]
    SensorOutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A computed intermediate violated an invariant that valid inputs
    /// should have guaranteed.
    #[error("internal consistency failure: {0}")]
    InternalError(String),

    #[error("storage error: {0}")]
    StorageError(#[from] sqlx::Error),

    #[error("sensor driver error: {0}")]
    Driver(#[from] crate::driver::DriverError),

    /// A corrected record was requested before the first successful update.
    #[error("no corrected record available yet")]
    NotReady,
}
