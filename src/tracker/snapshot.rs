use crate::domain::{Coordinate, FenceStatus};
use std::fmt;

/// What the tracker panel shows after every handled event.
#[derive(Clone, PartialEq, Debug)]
pub struct TrackerSnapshot {
    pub tracking: bool,
    pub mode: &'static str,
    pub position: PositionDisplay,
    pub last_status: Option<FenceStatus>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PositionDisplay {
    Known(Coordinate),
    /// Waiting for the first fix of a live sensor.
    Loading,
    NotAvailable,
}

impl Default for TrackerSnapshot {
    fn default() -> Self {
        TrackerSnapshot {
            tracking: false,
            mode: "fixed",
            position: PositionDisplay::NotAvailable,
            last_status: None,
        }
    }
}

impl fmt::Display for PositionDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionDisplay::Known(coordinate) => write!(f, "{}", coordinate),
            PositionDisplay::Loading => write!(f, "Loading..."),
            PositionDisplay::NotAvailable => write!(f, "Not available"),
        }
    }
}

impl fmt::Display for TrackerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.tracking { "Tracking in progress" } else { "Not tracking" };
        write!(f, "{} ({}), trackee position: {}", state, self.mode, self.position)?;

        if let (PositionDisplay::Known(_), Some(status)) = (self.position, self.last_status) {
            let side = if status.outside { "outside" } else { "inside" };
            write!(f, ", {:.0} m from the geofence center, {}", status.distance_m, side)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn displays_an_idle_snapshot() {
        assert_eq!(TrackerSnapshot::default().to_string(), "Not tracking (fixed), trackee position: Not available");
    }

    #[test]
    fn displays_a_loading_live_snapshot() {
        let snapshot = TrackerSnapshot {
            tracking: true,
            mode: "live",
            position: PositionDisplay::Loading,
            last_status: None,
        };

        assert_eq!(snapshot.to_string(), "Tracking in progress (live), trackee position: Loading...");
    }

    #[test]
    fn displays_the_distance_for_a_known_position() -> Result<(), crate::domain::CoordinateError> {
        let snapshot = TrackerSnapshot {
            tracking: true,
            mode: "fixed",
            position: PositionDisplay::Known(Coordinate::new(30.776851, 76.576063)?),
            last_status: Some(FenceStatus {
                distance_m: 1111.95,
                outside: true,
            }),
        };

        assert_eq!(
            snapshot.to_string(),
            "Tracking in progress (fixed), trackee position: 30.776851, 76.576063, 1112 m from the geofence center, outside"
        );
        Ok(())
    }
}
