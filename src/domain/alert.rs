const EXIT_MESSAGE: &str = "Geofence Alert: The trackee has exited the geofence boundary.";
const ENTRY_MESSAGE: &str = "Geofence Alert: The trackee has entered the geofence boundary.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Crossing {
    Exit,
    Entry,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Alert {
    Exited { distance_m: f64 },
    Entered { distance_m: f64 },
    /// Fired by hand from the console, no geofence evaluation involved.
    Test(Crossing),
    SensorUnavailable(String),
}

impl Alert {
    pub fn message(&self) -> String {
        match self {
            Alert::Exited { .. } => EXIT_MESSAGE.to_string(),
            Alert::Entered { .. } => ENTRY_MESSAGE.to_string(),
            Alert::Test(Crossing::Exit) => format!("[test] {}", EXIT_MESSAGE),
            Alert::Test(Crossing::Entry) => format!("[test] {}", ENTRY_MESSAGE),
            Alert::SensorUnavailable(reason) => format!("Location unavailable: {}. The trackee position is unknown.", reason),
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Alert::Test(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Alert::Exited { distance_m: 1113.2 }, "Geofence Alert: The trackee has exited the geofence boundary.")]
    #[case(Alert::Entered { distance_m: 0.0 }, "Geofence Alert: The trackee has entered the geofence boundary.")]
    #[case(Alert::Test(Crossing::Exit), "[test] Geofence Alert: The trackee has exited the geofence boundary.")]
    #[case(Alert::Test(Crossing::Entry), "[test] Geofence Alert: The trackee has entered the geofence boundary.")]
    #[case(Alert::SensorUnavailable("permission denied".to_string()), "Location unavailable: permission denied. The trackee position is unknown.")]
    fn renders_a_human_readable_message(#[case] alert: Alert, #[case] expected: &str) {
        assert_eq!(alert.message(), expected);
    }
}
