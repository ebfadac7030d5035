use crate::app_config::Replay;
use crate::domain::{Position, PositionPayload};
use crate::position_source::{LiveOptions, LocationSensor, Reading, SensorError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tokio::sync::mpsc::Sender;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, instrument};

/// Plays back a recorded track, one fix per interval, then stops reporting.
#[derive(Debug)]
pub struct ReplaySensor {
    track_file: PathBuf,
    interval: Duration,
}

impl ReplaySensor {
    pub fn new(config: &Replay) -> Self {
        ReplaySensor {
            track_file: config.track_file().to_path_buf(),
            // tokio's interval panics on a zero period
            interval: config.interval().max(Duration::from_millis(1)),
        }
    }

    async fn load_track(&self) -> Result<Vec<PositionPayload>, SensorError> {
        let content = fs::read_to_string(&self.track_file)
            .await
            .map_err(|e| SensorError::Unavailable(format!("cannot read track '{}': {}", self.track_file.display(), e)))?;

        serde_json::from_str(&content).map_err(|e| SensorError::Unavailable(format!("invalid track '{}': {}", self.track_file.display(), e)))
    }
}

#[async_trait]
impl LocationSensor for ReplaySensor {
    fn kind(&self) -> &'static str {
        "replay"
    }

    #[instrument(skip_all, fields(sensor = self.kind(), track = %self.track_file.display()))]
    async fn watch(&self, options: LiveOptions, tx: Sender<Reading>) -> Result<(), SensorError> {
        info!("📁 Loading track...");
        let fixes = self.load_track().await?;
        info!("📁 Loading track... OK, {} fixes", fixes.len());

        if options.high_accuracy {
            debug!("Replayed fixes keep their recorded accuracy");
        }

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for payload in fixes {
            ticker.tick().await;
            if tx.send(Position::try_from(payload).map_err(SensorError::from)).await.is_err() {
                debug!("Reading receiver dropped, stopping replay");
                return Ok(());
            }
        }

        info!("📁 Track finished, last fix stays current");
        Ok(())
    }
}
