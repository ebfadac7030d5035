use crate::domain::{Coordinate, CoordinateError};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single fix reported by a position source.
#[derive(Clone, PartialEq, Debug)]
pub struct Position {
    pub coordinate: Coordinate,
    pub accuracy_m: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Position {
    pub fn now(coordinate: Coordinate) -> Self {
        Position {
            coordinate,
            accuracy_m: None,
            timestamp: Utc::now(),
        }
    }
}

/// Fix as reported on the wire by location sensors, before validation.
#[derive(Deserialize, PartialEq, Debug)]
pub struct PositionPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    /// Milliseconds since the Unix epoch
    pub timestamp: Option<i64>,
}

impl TryFrom<PositionPayload> for Position {
    type Error = CoordinateError;

    fn try_from(payload: PositionPayload) -> Result<Self, Self::Error> {
        let coordinate = Coordinate::new(payload.latitude, payload.longitude)?;
        let timestamp = payload.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis).unwrap_or_else(Utc::now);

        Ok(Position {
            coordinate,
            accuracy_m: payload.accuracy.filter(|accuracy| accuracy.is_finite() && *accuracy >= 0.0),
            timestamp,
        })
    }
}
