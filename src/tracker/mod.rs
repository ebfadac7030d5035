mod alert_policy;
mod session;
mod snapshot;
mod tracker;

pub use alert_policy::AlertPolicy;
pub use snapshot::{PositionDisplay, TrackerSnapshot};
pub use tracker::Tracker;
