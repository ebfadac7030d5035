use crate::tracker::TrackerSnapshot;
use tokio::sync::watch::Receiver;
use tracing::{info, instrument};

#[instrument(skip_all)]
pub async fn tracker_listener(mut rx: Receiver<TrackerSnapshot>) {
    while rx.changed().await.is_ok() {
        let snapshot: TrackerSnapshot = rx.borrow_and_update().clone();
        info!(tracking = snapshot.tracking, mode = snapshot.mode, "📍 {}", snapshot);
    }
}
