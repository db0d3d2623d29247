//! Human-readable labels for coordinates, distances and timestamps.

use chrono::{DateTime, Utc};

use crate::models::GeoPoint;

pub const DEFAULT_COORDINATE_PRECISION: usize = 4;

pub fn format_coordinates(point: GeoPoint, precision: usize) -> String {
    format!(
        "{:.*}, {:.*}",
        precision,
        point.latitude(),
        precision,
        point.longitude()
    )
}

/// "850 m" below a kilometre, "1.25 km" from there on
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round())
    }
}

/// How long ago `at` was, e.g. "5m ago"; a week or older shows the date
pub fn format_relative_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - at;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}
