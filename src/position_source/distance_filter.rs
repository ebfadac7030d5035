use crate::domain::Coordinate;
use crate::evaluator::distance_m;

/// Drops fixes that moved less than a minimum distance since the last accepted one.
#[derive(Debug)]
pub struct DistanceFilter {
    min_distance_m: f64,
    last: Option<Coordinate>,
}

impl DistanceFilter {
    pub fn new(min_distance_m: f64) -> Self {
        DistanceFilter { min_distance_m, last: None }
    }

    pub fn accept(&mut self, coordinate: &Coordinate) -> bool {
        let accepted = match self.last {
            Some(last) if self.min_distance_m > 0.0 => distance_m(&last, coordinate) >= self.min_distance_m,
            _ => true,
        };

        if accepted {
            self.last = Some(*coordinate);
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(latitude: f64) -> Coordinate {
        Coordinate::new(latitude, 76.576063).unwrap()
    }

    #[test]
    fn always_accepts_the_first_fix() {
        let mut filter = DistanceFilter::new(1_000_000.0);

        assert!(filter.accept(&coordinate(30.0)));
    }

    #[test]
    fn drops_fixes_below_the_threshold() {
        // 0.0001 degree of latitude is about 11 meters
        let mut filter = DistanceFilter::new(10.0);

        assert!(filter.accept(&coordinate(30.0)));
        assert!(!filter.accept(&coordinate(30.00005)));
        assert!(filter.accept(&coordinate(30.0001)));
    }

    #[test]
    fn measures_from_the_last_accepted_fix() {
        let mut filter = DistanceFilter::new(10.0);

        assert!(filter.accept(&coordinate(30.0)));
        assert!(!filter.accept(&coordinate(30.00006)));
        // 11 m from the first fix, but only 4.5 m from the dropped one
        assert!(filter.accept(&coordinate(30.0001)));
    }

    #[test]
    fn zero_disables_filtering() {
        let mut filter = DistanceFilter::new(0.0);

        assert!(filter.accept(&coordinate(30.0)));
        assert!(filter.accept(&coordinate(30.0)));
    }
}
