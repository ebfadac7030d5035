use crate::domain::{Coordinate, CoordinateError, FenceStatus, Geofence};

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two coordinates, assuming a spherical Earth.
pub fn distance_m(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let delta_lat = (to.latitude() - from.latitude()).to_radians();
    let delta_lon = (to.longitude() - from.longitude()).to_radians();

    // Rounding can push `a` slightly past 1 for antipodal points
    let a = ((delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2)).clamp(0.0, 1.0);
    let central_angle = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * central_angle
}

/// Decides whether `position` lies outside the circle of `radius_m` meters around `center`.
pub fn evaluate(position: &Coordinate, center: &Coordinate, radius_m: f64) -> Result<FenceStatus, CoordinateError> {
    let geofence = Geofence::new(*center, radius_m)?;
    Ok(geofence.evaluate(position))
}
