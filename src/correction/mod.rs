pub mod vapor;

pub use vapor::saturation_vapor_pressure;

use crate::error::ClimateError;

/// Linear-fit coefficients for the self-heating temperature correction.
///
/// Obtained once by calibrating this specific enclosure against a reference
/// thermometer; fixed after configuration, never adjusted at runtime.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    pub slope: f64,
    pub intercept: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            slope: 0.8542,
            intercept: -9.675,
        }
    }
}

/// Converts enclosure-biased readings into ambient-equivalent values.
///
/// The enclosure self-heats, so the measured temperature overstates ambient
/// and the measured relative humidity understates it. Pressure equalizes
/// through the vents and needs no correction.
#[derive(Debug, Clone, Copy)]
pub struct AmbientCorrector {
    calibration: Calibration,
}

impl AmbientCorrector {
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }

    /// Ambient temperature from the measured enclosure temperature.
    ///
    /// Affine extrapolation; it can legally produce values outside the vapor
    /// model's validity range for extreme inputs, in which case the
    /// downstream humidity correction surfaces the `InvalidInput`.
    pub fn ambient_temperature(&self, measured: f64) -> f64 {
        self.calibration.slope * measured + self.calibration.intercept
    }

    /// Ambient pressure from the measured pressure.
    ///
    /// Identity on purpose: the enclosure is vented, so interior pressure
    /// tracks ambient. Kept as an explicit operation so the correction
    /// pipeline treats all three quantities uniformly.
    pub fn ambient_pressure(&self, measured: f64) -> f64 {
        measured
    }

    /// Ambient relative humidity from the measured one.
    ///
    /// The actual vapor pressure is the same inside and outside the vented
    /// enclosure, so the measured RH only needs rescaling by the ratio of
    /// saturation vapor pressures at the two temperatures. The result is not
    /// range-checked and can exceed 100% when the linear temperature
    /// correction extrapolates poorly.
    pub fn ambient_humidity(
        &self,
        measured_humidity: f64,
        measured_temperature: f64,
        measured_pressure: f64,
        ambient_temperature: f64,
        ambient_pressure: f64,
    ) -> Result<f64, ClimateError> {
        let inside = saturation_vapor_pressure(measured_pressure, measured_temperature)?;
        let outside = saturation_vapor_pressure(ambient_pressure, ambient_temperature)?;
        Ok(measured_humidity * inside / outside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_pressure_is_identity() {
        let corrector = AmbientCorrector::new(Calibration::default());
        for pressure in [260.0, 1005.0, 1013.25, 1260.0, -3.0, 0.0] {
            assert_eq!(corrector.ambient_pressure(pressure), pressure);
        }
    }

    #[test]
    fn test_ambient_temperature_is_affine() {
        let corrector = AmbientCorrector::new(Calibration::default());
        for temperature in [-10.0, 0.0, 12.5, 30.0, 65.0] {
            let expected = 0.8542 * temperature - 9.675;
            assert!((corrector.ambient_temperature(temperature) - expected).abs() < 1e-12);
        }
        assert!((corrector.ambient_temperature(30.0) - 15.951).abs() < 1e-9);
    }

    #[test]
    fn test_ambient_humidity_is_linear_in_measured_humidity() {
        let corrector = AmbientCorrector::new(Calibration::default());
        let single = corrector
            .ambient_humidity(40.0, 32.0, 1005.0, 17.6594, 1005.0)
            .unwrap();
        let double = corrector
            .ambient_humidity(80.0, 32.0, 1005.0, 17.6594, 1005.0)
            .unwrap();
        assert!((double - 2.0 * single).abs() < 1e-9);
    }

    #[test]
    fn test_ambient_humidity_round_trip_collapses() {
        // Equal temperatures and pressures make the saturation ratio 1.
        let corrector = AmbientCorrector::new(Calibration::default());
        let humidity = corrector
            .ambient_humidity(55.0, 21.0, 1010.0, 21.0, 1010.0)
            .unwrap();
        assert!((humidity - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_ambient_humidity_increases_when_enclosure_is_warmer() {
        // Warmer air holds more vapor, so the same absolute vapor content
        // reads as a lower RH inside the warm enclosure than outside.
        let corrector = AmbientCorrector::new(Calibration::default());
        let ambient_temperature = corrector.ambient_temperature(32.0);
        assert!(ambient_temperature < 32.0);
        let humidity = corrector
            .ambient_humidity(45.0, 32.0, 1005.0, ambient_temperature, 1005.0)
            .unwrap();
        assert!(humidity > 45.0);
    }

    #[test]
    fn test_ambient_humidity_propagates_vapor_model_errors() {
        // A cold enclosure extrapolates to an ambient temperature below the
        // vapor model's validity range; the error surfaces, unclamped.
        let corrector = AmbientCorrector::new(Calibration::default());
        let ambient_temperature = corrector.ambient_temperature(-15.0);
        assert!(ambient_temperature < vapor::MODEL_TEMP_MIN_C);
        let err = corrector
            .ambient_humidity(45.0, -15.0, 1005.0, ambient_temperature, 1005.0)
            .unwrap_err();
        assert!(matches!(
            err,
            ClimateError::InvalidInput {
                quantity: "temperature",
                ..
            }
        ));
    }
}
