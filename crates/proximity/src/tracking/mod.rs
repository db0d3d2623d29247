//! Position sources, location history and destination tracking.

pub mod sensor;
pub mod track;
pub mod tracker;

pub use sensor::{PositionFix, PositionSensor};
pub use track::LocationTrack;
pub use tracker::{ProximityReport, ProximityTracker};
