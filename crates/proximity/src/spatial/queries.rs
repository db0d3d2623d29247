//! Great-circle distance, bearing and proximity filters.
//!
//! Uses the Haversine formula over the mean Earth radius (6 371 008.8 m).

use geo::{HaversineBearing, HaversineDistance, Point};

use crate::models::{DistanceUnit, GeoPoint, Located};

/// Sphere radius behind `geo`'s haversine algorithms
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Raw Haversine distance between two points in meters (unrounded)
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    Point::from(from).haversine_distance(&Point::from(to))
}

/// Great-circle distance in `unit`, rounded to two decimals
pub fn distance(from: GeoPoint, to: GeoPoint, unit: DistanceUnit) -> f64 {
    let km = haversine_distance(from, to) / 1000.0;
    round_to_hundredths(unit.convert(km))
}

/// Initial compass bearing from `from` toward `to`, in degrees `[0, 360)`
pub fn bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let signed = Point::from(from).haversine_bearing(Point::from(to));
    let normalized = signed.rem_euclid(360.0);

    // rem_euclid can land exactly on the modulus for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Whether two points are within `tolerance_m` meters of each other
pub fn are_locations_similar(a: GeoPoint, b: GeoPoint, tolerance_m: f64) -> bool {
    distance(a, b, DistanceUnit::Meters) <= tolerance_m
}

/// Closest item strictly inside `radius_km`; ties keep the earliest item
pub fn find_nearest_stop<T: Located>(user: GeoPoint, stops: &[T], radius_km: f64) -> Option<&T> {
    let mut nearest = None;
    let mut min_distance = radius_km;

    for stop in stops {
        let d = distance(user, stop.location(), DistanceUnit::Kilometers);
        if d < min_distance {
            min_distance = d;
            nearest = Some(stop);
        }
    }

    nearest
}

/// Items within `radius_km` (inclusive), in their original order
pub fn find_nearby_buses<T: Located>(user: GeoPoint, buses: &[T], radius_km: f64) -> Vec<&T> {
    buses
        .iter()
        .filter(|bus| distance(user, bus.location(), DistanceUnit::Kilometers) <= radius_km)
        .collect()
}

/// Arc length in meters as degrees of latitude on the haversine sphere
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    (meters / MEAN_EARTH_RADIUS_M).to_degrees()
}

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
