use geofence_tracker::app_config::AppConfig;
use geofence_tracker::console;
use geofence_tracker::domain::events::Event;
use geofence_tracker::notifier::LogNotifier;
use geofence_tracker::position_source::PositionSource;
use geofence_tracker::tracker::Tracker;
use geofence_tracker::tracker_listener::tracker_listener;
use std::sync::Arc;
use tokio::io::{BufReader, stdin};
use tokio::sync::mpsc;
use tokio::task;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let geofence = config.geofence().clone();
    info!(
        radius_m = geofence.radius_m(),
        "✅  Geofence centered at {} with a radius of {} m",
        geofence.center(),
        geofence.radius_m()
    );

    let source = PositionSource::from_config(config.trackee().source())?;
    info!("✅  Trackee position source is {}", source.mode());

    let (tx, rx) = mpsc::channel::<Event>(config.core().event_buffer_size());
    let mut tracker = Tracker::new(geofence, source, config.trackee().alert_policy(), Arc::new(LogNotifier), tx.clone(), rx);
    let snapshot_rx = tracker.snapshots();

    task::spawn(async move {
        tracker_listener(snapshot_rx).await;
    });
    info!("✅  Initialized tracker listener");

    let tracker_task = task::spawn(async move {
        tracker.listen().await;
    });
    info!("✅  Initialized tracker");
    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    console::listen(BufReader::new(stdin()), tx).await?;
    tracker_task.await?;

    Ok(())
}
