use crate::domain::events::{Event, SubscriptionId};
use crate::position_source::distance_filter::DistanceFilter;
use crate::position_source::{LiveOptions, LocationSensor, Reading};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, trace, warn};

const READING_BUFFER_SIZE: usize = 16;

/// Handle to a running sensor watch. Cancelling or dropping it stops the sensor task.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn spawn(id: SubscriptionId, sensor: Arc<dyn LocationSensor>, options: LiveOptions, events: Sender<Event>) -> Self {
        let span = info_span!("subscription", id = %id, sensor = sensor.kind());
        let handle = tokio::spawn(
            async move {
                let (tx, rx) = mpsc::channel::<Reading>(READING_BUFFER_SIZE);
                info!("📡 Watching location sensor...");

                let (result, _) = tokio::join!(sensor.watch(options, tx), forward_readings(id, rx, options, events.clone()));
                match result {
                    Ok(()) => info!("📡 Location sensor finished"),
                    Err(error) => {
                        warn!("⚠️ Location sensor failed: {}", error);
                        if events.send(Event::SensorFailed { subscription: id, error }).await.is_err() {
                            debug!("Tracker is gone, dropping sensor failure");
                        }
                    }
                }
            }
            .instrument(span),
        );

        Subscription { id, handle }
    }

    pub fn cancel(self) {
        info!(subscription = %self.id, "📡 Cancelling location subscription");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn forward_readings(id: SubscriptionId, mut rx: Receiver<Reading>, options: LiveOptions, events: Sender<Event>) {
    let mut filter = DistanceFilter::new(options.min_distance_filter_m);

    while let Some(reading) = rx.recv().await {
        match reading {
            Ok(position) if filter.accept(&position.coordinate) => {
                if events.send(Event::PositionUpdated { subscription: id, position }).await.is_err() {
                    debug!("Tracker is gone, stop forwarding readings");
                    break;
                }
            }
            Ok(position) => trace!("Dropping fix {} within {} m of the previous one", position.coordinate, options.min_distance_filter_m),
            Err(error) => warn!("⚠️ Skipping sensor reading: {}", error),
        }
    }
}
