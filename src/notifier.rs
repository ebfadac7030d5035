use crate::domain::Alert;
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::warn;

/// The surface alerts are shown on.
#[async_trait]
pub trait Notifier: Debug + Send + Sync {
    async fn notify(&self, alert: &Alert);
}

#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, alert: &Alert) {
        warn!(test = alert.is_test(), "🚨 {}", alert.message());
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: std::sync::Mutex<Vec<Alert>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, alert: &Alert) {
        self.alerts.lock().unwrap().push(alert.clone());
    }
}
