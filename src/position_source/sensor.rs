use crate::domain::{CoordinateError, Position};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::mpsc::Sender;

/// Sampling options handed to a sensor when a live subscription starts.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LiveOptions {
    pub high_accuracy: bool,
    /// Fixes closer than this to the last delivered fix are dropped. Zero delivers everything.
    pub min_distance_filter_m: f64,
}

pub type Reading = Result<Position, SensorError>;

/// A device location sensor that pushes readings until it gives up or is cancelled.
///
/// A reading carrying an error is reported and skipped. Returning an error from `watch` ends the
/// subscription and leaves the trackee position unknown.
#[async_trait]
pub trait LocationSensor: Debug + Send + Sync {
    fn kind(&self) -> &'static str;

    async fn watch(&self, options: LiveOptions, tx: Sender<Reading>) -> Result<(), SensorError>;
}

#[derive(Error, Debug)]
pub enum SensorError {
    #[error("location sensor unavailable: {0}")]
    Unavailable(String),
    #[error("location permission denied")]
    PermissionDenied,
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] CoordinateError),
}
