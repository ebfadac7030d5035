use crate::domain::events::{Event, SubscriptionId};
use crate::domain::{Alert, Crossing, Geofence, Position};
use crate::notifier::Notifier;
use crate::position_source::{PositionSource, SensorError, Subscription};
use crate::tracker::session::{ActiveSession, TrackingSession};
use crate::tracker::snapshot::{PositionDisplay, TrackerSnapshot};
use crate::tracker::AlertPolicy;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::watch;
use tokio::sync::watch::{Receiver as WatchReceiver, Sender as WatchSender};
use tracing::{debug, info, instrument, warn};

/// Owns the tracking session and the trackee position. All state changes go through [`Tracker::handle`].
#[derive(Debug)]
pub struct Tracker {
    geofence: Geofence,
    source: PositionSource,
    policy: AlertPolicy,
    notifier: Arc<dyn Notifier>,
    session: TrackingSession,
    position: Option<Position>,
    next_subscription: u64,
    tx: Sender<Event>,
    rx: Receiver<Event>,
    snapshot_tx: WatchSender<TrackerSnapshot>,
    snapshot_rx: WatchReceiver<TrackerSnapshot>,
}

impl Tracker {
    pub fn new(geofence: Geofence, source: PositionSource, policy: AlertPolicy, notifier: Arc<dyn Notifier>, tx: Sender<Event>, rx: Receiver<Event>) -> Self {
        let position = match &source {
            PositionSource::Fixed(coordinate) => Some(Position::now(*coordinate)),
            PositionSource::Live { .. } => None,
        };
        let (snapshot_tx, snapshot_rx) = watch::channel(TrackerSnapshot::default());

        let tracker = Tracker {
            geofence,
            source,
            policy,
            notifier,
            session: TrackingSession::Idle,
            position,
            next_subscription: 0,
            tx,
            rx,
            snapshot_tx,
            snapshot_rx,
        };
        tracker.publish();
        tracker
    }

    pub fn snapshots(&self) -> WatchReceiver<TrackerSnapshot> {
        self.snapshot_rx.clone()
    }

    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            if !self.handle(event).await {
                break;
            }
        }

        self.stop_tracking();
        self.publish();
        info!("🔵 Tracker stopped");
    }

    /// Applies one event. Returns `false` once the tracker should shut down.
    pub async fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::StartTracking => self.start_tracking().await,
            Event::StopTracking => self.stop_tracking(),
            Event::PositionUpdated { subscription, position } => self.position_updated(subscription, position).await,
            Event::SensorFailed { subscription, error } => self.sensor_failed(subscription, error).await,
            Event::TestAlert(crossing) => self.test_alert(crossing).await,
            Event::Status => {}
            Event::Shutdown => return false,
        }

        self.publish();
        true
    }

    async fn start_tracking(&mut self) {
        if let TrackingSession::Active(session) = &self.session {
            warn!(subscription = %session.id, "⚠️ Tracking already started");
            return;
        }

        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        info!(subscription = %id, mode = self.source.mode(), "📡 Starting tracking...");

        let subscription = match &self.source {
            PositionSource::Fixed(_) => None,
            PositionSource::Live { options, sensor } => Some(Subscription::spawn(id, sensor.clone(), *options, self.tx.clone())),
        };
        self.session = TrackingSession::Active(ActiveSession::new(id, subscription));
        info!(subscription = %id, "📡 Starting tracking... OK");

        if let PositionSource::Fixed(coordinate) = &self.source {
            self.position = Some(Position::now(*coordinate));
            self.evaluate().await;
        }
    }

    fn stop_tracking(&mut self) {
        let TrackingSession::Active(session) = std::mem::replace(&mut self.session, TrackingSession::Idle) else {
            debug!("Tracking not started, nothing to stop");
            return;
        };

        info!(subscription = %session.id, "📡 Stopping tracking...");
        session.cancel();
        if let PositionSource::Live { .. } = self.source {
            self.position = None;
        }
        info!("📡 Stopping tracking... OK");
    }

    async fn position_updated(&mut self, subscription: SubscriptionId, position: Position) {
        if !self.is_current(subscription) {
            debug!(subscription = %subscription, "Ignoring position from an inactive subscription");
            return;
        }

        debug!(subscription = %subscription, accuracy_m = ?position.accuracy_m, "📍 Trackee moved to {}", position.coordinate);
        self.position = Some(position);
        self.evaluate().await;
    }

    async fn sensor_failed(&mut self, subscription: SubscriptionId, error: SensorError) {
        if !self.is_current(subscription) {
            debug!(subscription = %subscription, "Ignoring sensor failure from an inactive subscription");
            return;
        }

        if let TrackingSession::Active(session) = &mut self.session {
            session.sensor_failed = true;
        }
        self.position = None;
        warn!(subscription = %subscription, "⚠️ Trackee position unknown: {}", error);
        self.notifier.notify(&Alert::SensorUnavailable(error.to_string())).await;
    }

    async fn test_alert(&self, crossing: Crossing) {
        info!("🧪 Firing {:?} test alert, no geofence evaluation involved", crossing);
        self.notifier.notify(&Alert::Test(crossing)).await;
    }

    async fn evaluate(&mut self) {
        let TrackingSession::Active(session) = &mut self.session else {
            return;
        };
        let Some(position) = &self.position else {
            debug!("No trackee position, nothing to evaluate");
            return;
        };

        let status = self.geofence.evaluate(&position.coordinate);
        let alert = self.policy.decide(session.last_status, status);
        session.last_status = Some(status);
        info!(distance_m = status.distance_m, outside = status.outside, "📏 Evaluated geofence");

        if let Some(alert) = alert {
            self.notifier.notify(&alert).await;
        }
    }

    fn is_current(&self, subscription: SubscriptionId) -> bool {
        match &self.session {
            TrackingSession::Active(session) => session.accepts(subscription),
            TrackingSession::Idle => false,
        }
    }

    fn snapshot(&self) -> TrackerSnapshot {
        let position = match (&self.position, &self.session, &self.source) {
            (Some(position), _, _) => PositionDisplay::Known(position.coordinate),
            (None, TrackingSession::Active(session), PositionSource::Live { .. }) if !session.sensor_failed => PositionDisplay::Loading,
            (None, _, _) => PositionDisplay::NotAvailable,
        };
        let last_status = match &self.session {
            TrackingSession::Active(session) => session.last_status,
            TrackingSession::Idle => None,
        };

        TrackerSnapshot {
            tracking: self.session.is_active(),
            mode: self.source.mode(),
            position,
            last_status,
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send(self.snapshot()).unwrap_or_default();
    }

    #[cfg(test)]
    fn subscription_id(&self) -> Option<SubscriptionId> {
        match &self.session {
            TrackingSession::Active(session) => Some(session.id),
            TrackingSession::Idle => None,
        }
    }
}
