use crate::error::ClimateError;

/// Validity range of the empirical saturation model, °C.
pub const MODEL_TEMP_MIN_C: f64 = -20.0;
pub const MODEL_TEMP_MAX_C: f64 = 50.0;

/// Saturation vapor pressure of water in hPa at the given air pressure (hPa)
/// and temperature (°C).
///
/// Buck-style empirical fit: an exponential in temperature scaled by a
/// pressure-dependent enhancement factor. Inputs outside the fit's validity
/// domain are rejected, never clamped.
pub fn saturation_vapor_pressure(air_pressure: f64, temperature: f64) -> Result<f64, ClimateError> {
    // The negated comparison also rejects NaN.
    if !(air_pressure > 0.0) {
        return Err(ClimateError::InvalidInput {
            quantity: "air pressure",
            value: air_pressure,
            constraint: "must be > 0 hPa",
        });
    }
    if !(MODEL_TEMP_MIN_C..=MODEL_TEMP_MAX_C).contains(&temperature) {
        return Err(ClimateError::InvalidInput {
            quantity: "temperature",
            value: temperature,
            constraint: "must be within [-20, 50] °C",
        });
    }

    let enhancement = 1.0007 + 3.46e-6 * air_pressure;
    let vapor_pressure =
        enhancement * 6.1121 * (17.502 * temperature / (240.97 + temperature)).exp();

    if vapor_pressure <= 0.0 {
        return Err(ClimateError::InternalError(format!(
            "non-positive saturation vapor pressure {} from p = {} hPa, t = {} °C",
            vapor_pressure, air_pressure, temperature
        )));
    }

    Ok(vapor_pressure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_and_monotonic_in_temperature() {
        let mut previous = 0.0;
        for step in 0..=70 {
            let temperature = -20.0 + step as f64;
            let vp = saturation_vapor_pressure(1013.25, temperature).unwrap();
            assert!(vp > 0.0, "vp must be positive at {temperature} °C");
            assert!(vp > previous, "vp must increase with temperature");
            previous = vp;
        }
    }

    #[test]
    fn test_sanity_at_zero_celsius() {
        // Known value near the triple point, within 1%.
        let vp = saturation_vapor_pressure(1013.25, 0.0).unwrap();
        assert!((vp - 6.11).abs() / 6.11 < 0.01, "got {vp}");
    }

    #[test]
    fn test_rejects_non_positive_pressure() {
        for pressure in [0.0, -5.0, f64::NAN] {
            let err = saturation_vapor_pressure(pressure, 20.0).unwrap_err();
            assert!(matches!(
                err,
                ClimateError::InvalidInput {
                    quantity: "air pressure",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_rejects_temperature_outside_validity_range() {
        for temperature in [-20.5, 50.5, f64::NAN] {
            let err = saturation_vapor_pressure(1013.25, temperature).unwrap_err();
            assert!(matches!(
                err,
                ClimateError::InvalidInput {
                    quantity: "temperature",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_validity_boundaries_are_inclusive() {
        assert!(saturation_vapor_pressure(1013.25, -20.0).is_ok());
        assert!(saturation_vapor_pressure(1013.25, 50.0).is_ok());
    }
}
