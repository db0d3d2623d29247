//! Spatial indexing and query utilities.

pub mod index;
pub mod queries;

pub use queries::{
    are_locations_similar, bearing, distance, find_nearby_buses, find_nearest_stop,
    haversine_distance, MEAN_EARTH_RADIUS_M,
};
