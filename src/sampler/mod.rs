use chrono::Utc;
use log::{debug, warn};

use crate::correction::AmbientCorrector;
use crate::driver::SensorDriver;
use crate::error::ClimateError;
use crate::models::{CorrectedRecord, RawReading, TIMESTAMP_FORMAT};

/// Physically plausible bounds for raw readings, as (min, max) pairs.
/// A value outside these points at a sensor fault, not at unusual weather.
#[derive(Debug, Clone, Copy)]
pub struct PlausibleBounds {
    pub humidity: (f64, f64),
    pub temperature: (f64, f64),
    pub pressure: (f64, f64),
}

impl Default for PlausibleBounds {
    fn default() -> Self {
        Self {
            humidity: (0.0, 100.0),
            temperature: (0.0, 65.0),
            pressure: (260.0, 1260.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleState {
    Idle,
    Reading,
    Corrected,
}

/// Runs one measurement cycle at a time: raw reads, plausibility checks, a
/// UTC timestamp, then the ambient correction. Holds the most recent
/// corrected record once a cycle has completed.
///
/// Not safe to drive concurrently; the sampling loop runs cycles strictly
/// one after another.
pub struct SensorSample<D> {
    driver: D,
    corrector: AmbientCorrector,
    bounds: PlausibleBounds,
    state: CycleState,
    record: Option<CorrectedRecord>,
}

impl<D: SensorDriver> SensorSample<D> {
    pub fn new(driver: D, corrector: AmbientCorrector, bounds: PlausibleBounds) -> Self {
        Self {
            driver,
            corrector,
            bounds,
            state: CycleState::Idle,
            record: None,
        }
    }

    /// Produce a fresh corrected record. Each call is an independent cycle;
    /// a failure leaves the previously stored record (if any) untouched.
    pub fn update(&mut self) -> Result<&CorrectedRecord, ClimateError> {
        self.state = CycleState::Reading;
        match self.run_cycle() {
            Ok(record) => {
                self.state = CycleState::Corrected;
                Ok(self.record.insert(record))
            }
            Err(e) => {
                // A failed cycle does not invalidate the previous record.
                self.state = if self.record.is_some() {
                    CycleState::Corrected
                } else {
                    CycleState::Idle
                };
                Err(e)
            }
        }
    }

    fn run_cycle(&mut self) -> Result<CorrectedRecord, ClimateError> {
        let raw = self.read_raw()?;
        debug!("raw reading: {:?}", raw);

        check_range("humidity", raw.humidity, self.bounds.humidity)?;
        check_range("temperature", raw.temperature, self.bounds.temperature)?;
        check_range("pressure", raw.pressure, self.bounds.pressure)?;

        let ambient_temperature = self.corrector.ambient_temperature(raw.temperature);
        let ambient_pressure = self.corrector.ambient_pressure(raw.pressure);
        let ambient_humidity = self.corrector.ambient_humidity(
            raw.humidity,
            raw.temperature,
            raw.pressure,
            ambient_temperature,
            ambient_pressure,
        )?;

        // The correction is deliberately unclamped; flag the anomaly so a
        // miscalibrated enclosure is visible in the logs.
        if !(0.0..=100.0).contains(&ambient_humidity) {
            warn!(
                "corrected humidity {:.1}% is outside [0, 100]%, calibration may be off",
                ambient_humidity
            );
        }

        Ok(CorrectedRecord {
            timestamp: raw.timestamp,
            ambient_humidity,
            ambient_temperature,
            ambient_pressure,
        })
    }

    /// The most recent corrected record. Fails with `NotReady` before the
    /// first successful [`update`](Self::update).
    pub fn record(&self) -> Result<&CorrectedRecord, ClimateError> {
        if self.state != CycleState::Corrected {
            return Err(ClimateError::NotReady);
        }
        self.record.as_ref().ok_or(ClimateError::NotReady)
    }

    fn read_raw(&mut self) -> Result<RawReading, ClimateError> {
        let humidity = self.driver.read_humidity()?;
        let temperature = self.driver.read_temperature()?;
        let pressure = self.driver.read_pressure()?;
        let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        Ok(RawReading {
            humidity,
            temperature,
            pressure,
            timestamp,
        })
    }
}

fn check_range(
    quantity: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ClimateError> {
    // NaN fails the containment check and is rejected as well.
    if !(min..=max).contains(&value) {
        return Err(ClimateError::SensorOutOfRange {
            quantity,
            value,
            min,
            max,
        });
    }
    Ok(())
}
