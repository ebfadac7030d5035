use crate::domain::{Coordinate, Geofence};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            latitude: f64,
            longitude: f64,
        }

        let inner = Inner::deserialize(deserializer)?;
        Coordinate::new(inner.latitude, inner.longitude).map_err(Error::custom)
    }
}

impl<'de> Deserialize<'de> for Geofence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            latitude: f64,
            longitude: f64,
            radius_m: f64,
        }

        let inner = Inner::deserialize(deserializer)?;
        let center = Coordinate::new(inner.latitude, inner.longitude).map_err(Error::custom)?;
        Geofence::new(center, inner.radius_m).map_err(Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_a_coordinate() -> Result<(), Box<dyn std::error::Error>> {
        let coordinate: Coordinate = serde_json::from_str(r#"{ "latitude": 30.766851, "longitude": 76.576063 }"#)?;

        assert_eq!(coordinate, Coordinate::new(30.766851, 76.576063)?);
        Ok(())
    }

    #[test]
    fn deserialize_fails_for_an_invalid_latitude() {
        let result = serde_json::from_str::<Coordinate>(r#"{ "latitude": 91.0, "longitude": 0.0 }"#);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().starts_with("invalid latitude: 91, must be between -90 and 90"));
    }

    #[test]
    fn deserializes_a_geofence() -> Result<(), Box<dyn std::error::Error>> {
        let geofence: Geofence = serde_json::from_str(r#"{ "latitude": 30.766851, "longitude": 76.576063, "radius_m": 1000 }"#)?;

        assert_eq!(geofence.center(), &Coordinate::new(30.766851, 76.576063)?);
        assert_eq!(geofence.radius_m(), 1000.0);
        Ok(())
    }

    #[test]
    fn deserialize_fails_for_a_negative_radius() {
        let result = serde_json::from_str::<Geofence>(r#"{ "latitude": 0.0, "longitude": 0.0, "radius_m": -5 }"#);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().starts_with("invalid geofence radius: -5"));
    }
}
