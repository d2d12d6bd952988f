//! Unit conversions applied when normalizing provider payloads.

/// Kelvin to Celsius, rounded to one decimal.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    round1(kelvin - 273.15)
}

/// Metres per second to kilometres per hour, rounded to one decimal.
pub fn ms_to_kmh(ms: f64) -> f64 {
    round1(ms * 3.6)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_reference_points() {
        assert!((kelvin_to_celsius(273.15) - 0.0).abs() < 0.1);
        assert!((kelvin_to_celsius(293.15) - 20.0).abs() < 0.1);
        assert!((kelvin_to_celsius(300.15) - 27.0).abs() < 0.1);
    }

    #[test]
    fn wind_speed_reference_points() {
        assert!((ms_to_kmh(10.0) - 36.0).abs() < 0.1);
        assert!((ms_to_kmh(0.0) - 0.0).abs() < 0.1);
        assert!((ms_to_kmh(2.5) - 9.0).abs() < 0.1);
    }

    #[test]
    fn rounding() {
        assert_eq!(round1(26.84), 26.8);
        assert_eq!(round1(26.86), 26.9);
        assert_eq!(round2(0.456), 0.46);
    }
}
