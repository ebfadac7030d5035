use crate::domain::FenceStatus;
use crate::domain::events::SubscriptionId;
use crate::position_source::Subscription;

#[derive(Debug)]
pub enum TrackingSession {
    Idle,
    Active(ActiveSession),
}

#[derive(Debug)]
pub struct ActiveSession {
    pub id: SubscriptionId,
    subscription: Option<Subscription>,
    pub last_status: Option<FenceStatus>,
    pub sensor_failed: bool,
}

impl ActiveSession {
    pub fn new(id: SubscriptionId, subscription: Option<Subscription>) -> Self {
        ActiveSession {
            id,
            subscription,
            last_status: None,
            sensor_failed: false,
        }
    }

    pub fn accepts(&self, subscription: SubscriptionId) -> bool {
        self.id == subscription && !self.sensor_failed
    }

    pub fn cancel(self) {
        if let Some(subscription) = self.subscription {
            subscription.cancel();
        }
    }
}

impl TrackingSession {
    pub fn is_active(&self) -> bool {
        matches!(self, TrackingSession::Active(_))
    }
}
