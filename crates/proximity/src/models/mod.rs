//! Value types, records, and traits.

pub mod entities;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use entities::{BusLocation, BusStatusReport, BusStop};
pub use traits::Located;
pub use types::{
    BusHealth, BusStatus, DelayClassification, DistanceUnit, GeoPoint, OccupancyLevel,
    ProximityError, Result, SensorError,
};
