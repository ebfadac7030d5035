pub mod alert;
mod coordinate;
pub mod events;
mod geofence;
mod position;

pub use alert::{Alert, Crossing};
pub use coordinate::{Coordinate, CoordinateError};
pub use geofence::{FenceStatus, Geofence};
pub use position::{Position, PositionPayload};
