//! # bus-watch-proximity
//!
//! Geospatial arithmetic behind the bus-watch screens: how far away a bus is,
//! which way to walk, when it will arrive, and how late and how full it is.
//!
//! ## Features
//!
//! - **Distance & bearing**: Haversine great-circle distance in km, m or miles
//! - **Arrival estimates**: speed-based ETAs and countdown labels
//! - **Status labels**: delay messages, occupancy levels, route progress
//! - **Stop lookup**: R-tree backed nearest-stop and radius queries
//! - **Tracking**: bounded location history and pluggable position sensors
//!
//! Every calculation is a pure function of its arguments. Invalid input
//! (out-of-range coordinates, zero speed, zero capacity) is rejected with a
//! [`ProximityError`] instead of leaking NaN into labels.
//!
//! ## Example
//!
//! ```
//! use bus_watch_proximity::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let user = GeoPoint::new(9.9300, 78.1250)?;
//! let bus = GeoPoint::new(9.9252, 78.1198)?;
//!
//! let km = distance(user, bus, DistanceUnit::Kilometers);
//! assert_eq!(km, 0.78);
//!
//! let now = Utc.with_ymd_and_hms(2024, 8, 15, 7, 45, 0).unwrap();
//! let eta = estimated_arrival(user, bus, 40.0, now)?;
//! assert_eq!(format_time_remaining(eta, now), "1 min");
//!
//! assert_eq!(delay_message(17), "15 mins delay");
//! assert_eq!(occupancy_level(38, 50)?, OccupancyLevel::High);
//! # Ok::<(), bus_watch_proximity::ProximityError>(())
//! ```

pub mod arrival;
pub mod config;
pub mod delay;
pub mod display;
pub mod identifiers;
pub mod models;
pub mod occupancy;
pub mod provider;
pub mod spatial;
pub mod tracking;

// Re-exports for convenience
pub mod prelude {
    pub use crate::arrival::*;
    pub use crate::config::ProximityConfig;
    pub use crate::delay::*;
    pub use crate::display::*;
    pub use crate::identifiers::*;
    pub use crate::models::*;
    pub use crate::occupancy::*;
    pub use crate::provider::{StopIndex, StopMatch};
    pub use crate::spatial::*;
    pub use crate::tracking::*;
}

pub use prelude::*;
