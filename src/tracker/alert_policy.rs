use crate::domain::{Alert, FenceStatus};
use serde::Deserialize;

/// When an evaluation turns into an alert.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPolicy {
    /// Alert once, on the first evaluation after tracking starts.
    #[default]
    OnStart,
    /// Alert on the first evaluation and whenever the inside/outside status flips.
    OnTransition,
}

impl AlertPolicy {
    pub fn decide(&self, previous: Option<FenceStatus>, current: FenceStatus) -> Option<Alert> {
        let fire = match (self, previous) {
            (_, None) => true,
            (AlertPolicy::OnStart, Some(_)) => false,
            (AlertPolicy::OnTransition, Some(previous)) => previous.outside != current.outside,
        };

        fire.then(|| alert_for(current))
    }
}

fn alert_for(status: FenceStatus) -> Alert {
    if status.outside {
        Alert::Exited { distance_m: status.distance_m }
    } else {
        Alert::Entered { distance_m: status.distance_m }
    }
}
