mod distance_filter;
mod replay_sensor;
mod sensor;
mod sse_sensor;
mod subscription;

use crate::app_config::{SensorConfig, SourceConfig};
use crate::domain::Coordinate;
use std::sync::Arc;

pub use replay_sensor::ReplaySensor;
pub use sensor::{LiveOptions, LocationSensor, Reading, SensorError};
pub use sse_sensor::SseSensor;
pub use subscription::Subscription;

/// Supplies the trackee position, either a constant or a live sensor feed.
#[derive(Debug, Clone)]
pub enum PositionSource {
    Fixed(Coordinate),
    Live { options: LiveOptions, sensor: Arc<dyn LocationSensor> },
}

impl PositionSource {
    pub fn from_config(config: &SourceConfig) -> Result<Self, SensorError> {
        match config {
            SourceConfig::Fixed { location } => Ok(PositionSource::Fixed(*location)),
            SourceConfig::Live {
                high_accuracy,
                min_distance_filter_m,
                sensor,
            } => {
                let sensor: Arc<dyn LocationSensor> = match sensor {
                    SensorConfig::Sse(sse) => Arc::new(SseSensor::new(sse.clone())?),
                    SensorConfig::Replay(replay) => Arc::new(ReplaySensor::new(replay)),
                };
                let options = LiveOptions {
                    high_accuracy: *high_accuracy,
                    min_distance_filter_m: *min_distance_filter_m,
                };
                Ok(PositionSource::Live { options, sensor })
            }
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            PositionSource::Fixed(_) => "fixed",
            PositionSource::Live { .. } => "live",
        }
    }
}
