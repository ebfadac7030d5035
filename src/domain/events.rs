use crate::domain::Position;
use crate::domain::alert::Crossing;
use crate::position_source::SensorError;

/// Identifies one live sensor subscription. Every start of tracking gets a fresh id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(pub u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub enum Event {
    StartTracking,
    StopTracking,
    PositionUpdated { subscription: SubscriptionId, position: Position },
    SensorFailed { subscription: SubscriptionId, error: SensorError },
    TestAlert(Crossing),
    Status,
    Shutdown,
}
