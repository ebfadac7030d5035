use crate::app_config::Sse;
use crate::domain::{Position, PositionPayload};
use crate::position_source::{LiveOptions, LocationSensor, Reading, SensorError};
use crate::sse;
use crate::sse::{ServerSentEvent, SseError};
use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::mpsc;
use tokio::sync::mpsc::Sender;
use tracing::instrument;

const EVENT_BUFFER_SIZE: usize = 16;

/// Reads fixes from a location service that publishes them as a `text/event-stream`.
#[derive(Debug)]
pub struct SseSensor {
    client: Client,
    config: Sse,
}

impl SseSensor {
    pub fn new(config: Sse) -> Result<Self, SensorError> {
        let client = Client::builder()
            .build()
            .map_err(|e| SensorError::Unavailable(format!("cannot create HTTP client: {}", e)))?;

        Ok(SseSensor { client, config })
    }

    fn listen_config(&self, options: &LiveOptions) -> sse::Config {
        sse::Config {
            url: self.config.url().to_string(),
            query: vec![("high_accuracy".to_string(), options.high_accuracy.to_string())],
            retry_ms: self.config.retry_ms(),
            retry_max_delay: self.config.retry_max_delay_ms(),
            max_retries: self.config.max_retries(),
            stale_connection_timeout: self.config.stale_connection_timeout_ms(),
        }
    }
}

#[async_trait]
impl LocationSensor for SseSensor {
    fn kind(&self) -> &'static str {
        "sse"
    }

    #[instrument(skip_all, fields(sensor = self.kind()))]
    async fn watch(&self, options: LiveOptions, tx: Sender<Reading>) -> Result<(), SensorError> {
        let config = self.listen_config(&options);
        let (event_tx, mut event_rx) = mpsc::channel::<ServerSentEvent<PositionPayload>>(EVENT_BUFFER_SIZE);

        let forward = async move {
            while let Some(event) = event_rx.recv().await {
                let Some(payload) = event.data else {
                    continue;
                };

                if tx.send(Position::try_from(payload).map_err(SensorError::from)).await.is_err() {
                    break;
                }
            }
        };

        let (result, _) = tokio::join!(sse::listen(event_tx, &self.client, &config), forward);
        result.map_err(SensorError::from)
    }
}

impl From<SseError> for SensorError {
    fn from(error: SseError) -> Self {
        match error {
            SseError::Forbidden(_) => SensorError::PermissionDenied,
            other => SensorError::Unavailable(other.to_string()),
        }
    }
}
