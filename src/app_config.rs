use crate::domain::{Coordinate, Geofence};
use crate::tracker::AlertPolicy;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    geofence: Geofence,
    trackee: Trackee,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(config::File::with_name("config").required(true))
                .add_source(config::File::with_name("config_local").required(false))
                .add_source(environment()),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn geofence(&self) -> &Geofence {
        &self.geofence
    }

    pub fn trackee(&self) -> &Trackee {
        &self.trackee
    }
}

/// Overrides such as `GEOFENCE__GEOFENCE__RADIUS_M=250`.
fn environment() -> Environment {
    Environment::with_prefix("GEOFENCE").separator("__")
}

#[derive(Debug, Deserialize)]
pub struct Core {
    event_buffer_size: NonZeroUsize,
}

impl Core {
    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size.get()
    }
}

#[derive(Debug, Deserialize)]
pub struct Trackee {
    #[serde(default)]
    alert_policy: AlertPolicy,
    source: SourceConfig,
}

impl Trackee {
    pub fn alert_policy(&self) -> AlertPolicy {
        self.alert_policy
    }

    pub fn source(&self) -> &SourceConfig {
        &self.source
    }
}

/// Where the trackee position comes from, chosen once at startup.
#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SourceConfig {
    Fixed {
        location: Coordinate,
    },
    Live {
        #[serde(default = "default_high_accuracy")]
        high_accuracy: bool,
        #[serde(default = "default_min_distance_filter_m")]
        min_distance_filter_m: f64,
        sensor: SensorConfig,
    },
}

fn default_high_accuracy() -> bool {
    true
}

fn default_min_distance_filter_m() -> f64 {
    10.0
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorConfig {
    Sse(Sse),
    Replay(Replay),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sse {
    url: String,
    retry_ms: u64,
    retry_max_delay_ms: u64,
    max_retries: usize,
    stale_connection_timeout_ms: u64,
}

impl Sse {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn retry_ms(&self) -> u64 {
        self.retry_ms
    }

    pub fn retry_max_delay_ms(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    pub fn stale_connection_timeout_ms(&self) -> Duration {
        Duration::from_millis(self.stale_connection_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Replay {
    track_file: PathBuf,
    #[serde(with = "humantime_serde")]
    interval: Duration,
}

impl Replay {
    pub fn track_file(&self) -> &Path {
        &self.track_file
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
impl Sse {
    pub fn new(url: String, max_retries: usize) -> Self {
        Sse {
            url,
            retry_ms: 1,
            retry_max_delay_ms: 5,
            max_retries,
            stale_connection_timeout_ms: 5_000,
        }
    }
}

#[cfg(test)]
impl Replay {
    pub fn new(track_file: PathBuf, interval: Duration) -> Self {
        Replay { track_file, interval }
    }
}
