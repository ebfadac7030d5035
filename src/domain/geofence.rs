use crate::domain::{Coordinate, CoordinateError};
use crate::evaluator;

/// A circular boundary around a center coordinate.
#[derive(Clone, PartialEq, Debug)]
pub struct Geofence {
    center: Coordinate,
    radius_m: f64,
}

impl Geofence {
    pub fn new(center: Coordinate, radius_m: f64) -> Result<Self, CoordinateError> {
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(CoordinateError::InvalidRadius(radius_m));
        }

        Ok(Geofence { center, radius_m })
    }

    pub fn center(&self) -> &Coordinate {
        &self.center
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn evaluate(&self, position: &Coordinate) -> FenceStatus {
        let distance_m = evaluator::distance_m(position, &self.center);
        FenceStatus {
            distance_m,
            outside: distance_m > self.radius_m,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FenceStatus {
    pub distance_m: f64,
    pub outside: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_negative_radius() -> Result<(), CoordinateError> {
        let center = Coordinate::new(0.0, 0.0)?;
        assert_eq!(Geofence::new(center, -1.0), Err(CoordinateError::InvalidRadius(-1.0)));
        Ok(())
    }

    #[test]
    fn rejects_a_non_finite_radius() -> Result<(), CoordinateError> {
        let center = Coordinate::new(0.0, 0.0)?;
        assert!(Geofence::new(center, f64::NAN).is_err());
        assert!(Geofence::new(center, f64::INFINITY).is_err());
        Ok(())
    }

    #[test]
    fn a_point_on_the_boundary_is_inside() -> Result<(), CoordinateError> {
        let center = Coordinate::new(30.766851, 76.576063)?;
        let point = Coordinate::new(30.776851, 76.576063)?;
        let distance = evaluator::distance_m(&point, &center);

        let status = Geofence::new(center, distance)?.evaluate(&point);
        assert!(!status.outside);
        Ok(())
    }
}
