use thiserror::Error;

/// A WGS84 position in decimal degrees. Always finite and within range.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite { latitude, longitude });
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }

        Ok(Coordinate { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("coordinate must be finite, got ({latitude}, {longitude})")]
    NonFinite { latitude: f64, longitude: f64 },
    #[error("invalid latitude: {0}, must be between -90 and 90")]
    LatitudeOutOfRange(f64),
    #[error("invalid longitude: {0}, must be between -180 and 180")]
    LongitudeOutOfRange(f64),
    #[error("invalid geofence radius: {0}, must be a finite number of meters >= 0")]
    InvalidRadius(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn accepts_the_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[rstest]
    #[case(90.5, 0.0, CoordinateError::LatitudeOutOfRange(90.5))]
    #[case(-91.0, 0.0, CoordinateError::LatitudeOutOfRange(-91.0))]
    #[case(0.0, 180.1, CoordinateError::LongitudeOutOfRange(180.1))]
    #[case(0.0, -200.0, CoordinateError::LongitudeOutOfRange(-200.0))]
    fn rejects_out_of_range_values(#[case] latitude: f64, #[case] longitude: f64, #[case] expected: CoordinateError) {
        assert_eq!(Coordinate::new(latitude, longitude), Err(expected));
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::NAN)]
    #[case(f64::INFINITY, 0.0)]
    #[case(0.0, f64::NEG_INFINITY)]
    fn rejects_non_finite_values(#[case] latitude: f64, #[case] longitude: f64) {
        assert!(matches!(Coordinate::new(latitude, longitude), Err(CoordinateError::NonFinite { .. })));
    }

    #[test]
    fn displays_as_latitude_comma_longitude() -> Result<(), CoordinateError> {
        let coordinate = Coordinate::new(30.766851, 76.576063)?;
        assert_eq!(coordinate.to_string(), "30.766851, 76.576063");
        Ok(())
    }
}
