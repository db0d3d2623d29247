//! Speed-based arrival estimates and countdown formatting.

use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use crate::models::{DistanceUnit, GeoPoint, ProximityError, Result};
use crate::spatial::distance;

/// Assumed average speed of a city bus when nothing better is known
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 30.0;

const MAX_ETA_MINUTES: f64 = (i64::MAX / 60_000) as f64;

/// Whole minutes to cover the distance between two points at a given speed
///
/// Uses the two-decimal kilometre distance, then rounds to the nearest minute.
pub fn eta_minutes(current: GeoPoint, destination: GeoPoint, average_speed_kmh: f64) -> Result<i64> {
    if !average_speed_kmh.is_finite() || average_speed_kmh <= 0.0 {
        return Err(ProximityError::InvalidSpeed(average_speed_kmh));
    }

    let distance_km = distance(current, destination, DistanceUnit::Kilometers);
    let minutes = (distance_km / average_speed_kmh * 60.0).round();

    // TimeDelta holds at most i64::MAX milliseconds
    if !minutes.is_finite() || minutes > MAX_ETA_MINUTES {
        return Err(ProximityError::EtaOutOfRange {
            distance_km,
            average_speed_kmh,
        });
    }
    let minutes = minutes as i64;

    trace!(distance_km, average_speed_kmh, minutes, "computed eta");
    Ok(minutes)
}

/// Point in time the traveller reaches `destination`, counting from `now`
pub fn estimated_arrival(
    current: GeoPoint,
    destination: GeoPoint,
    average_speed_kmh: f64,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    let minutes = eta_minutes(current, destination, average_speed_kmh)?;
    Duration::try_minutes(minutes)
        .and_then(|eta| now.checked_add_signed(eta))
        .ok_or_else(|| ProximityError::EtaOutOfRange {
            distance_km: distance(current, destination, DistanceUnit::Kilometers),
            average_speed_kmh,
        })
}

/// Human countdown until `eta`
pub fn format_time_remaining(eta: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if eta <= now {
        return "Arrived".to_string();
    }

    match (eta - now).num_minutes() {
        0 => "Arriving soon".to_string(),
        1 => "1 min".to_string(),
        m if m < 60 => format!("{m} mins"),
        m => format!("{}h {}m", m / 60, m % 60),
    }
}

/// Human label for a travel duration given in seconds
pub fn format_travel_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round() as i64;

    match minutes {
        m if m < 1 => "Less than 1 min".to_string(),
        1 => "1 min".to_string(),
        m if m < 60 => format!("{m} mins"),
        m => format!("{}h {}m", m / 60, m % 60),
    }
}

/// Label for a stop's scheduled offset from the start of the route
pub fn format_stop_offset(minutes: u32) -> String {
    if minutes == 0 {
        return "Start".to_string();
    }

    let (hours, mins) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_eta_matches_distance_over_speed() {
        let a = pt(28.7041, 77.1025);
        let b = pt(28.80, 77.20);

        let km = distance(a, b, DistanceUnit::Kilometers);
        let expected = (km / 30.0 * 60.0).round() as i64;

        let eta = estimated_arrival(a, b, 30.0, noon()).unwrap();
        assert_eq!((eta - noon()).num_minutes(), expected);
        assert_eq!(eta_minutes(a, b, 30.0).unwrap(), expected);
    }

    #[test]
    fn test_eta_same_point_is_now() {
        let a = pt(9.93, 78.125);
        assert_eq!(estimated_arrival(a, a, 40.0, noon()).unwrap(), noon());
    }

    #[test]
    fn test_eta_rejects_bad_speed() {
        let a = pt(9.93, 78.125);
        let b = pt(9.9252, 78.1198);

        for speed in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                estimated_arrival(a, b, speed, noon()),
                Err(ProximityError::InvalidSpeed(_))
            ));
        }
    }

    #[test]
    fn test_eta_crawling_speed_is_an_error() {
        let a = pt(0.0, 0.0);
        let b = pt(0.0, 90.0);

        for speed in [1e-12, f64::MIN_POSITIVE] {
            assert!(matches!(
                eta_minutes(a, b, speed),
                Err(ProximityError::EtaOutOfRange { .. })
            ));
            assert!(matches!(
                estimated_arrival(a, b, speed, noon()),
                Err(ProximityError::EtaOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_eta_past_calendar_end_is_an_error() {
        // ~10 000 km at 1e-6 km/h is about a million years
        let a = pt(0.0, 0.0);
        let b = pt(0.0, 90.0);

        let minutes = eta_minutes(a, b, 1e-6).unwrap();
        assert!(minutes > 500_000_000_000);
        assert!(matches!(
            estimated_arrival(a, b, 1e-6, noon()),
            Err(ProximityError::EtaOutOfRange { .. })
        ));
    }

    #[test]
    fn test_format_time_remaining_boundaries() {
        let now = noon();
        assert_eq!(format_time_remaining(now, now), "Arrived");
        assert_eq!(format_time_remaining(now - Duration::minutes(3), now), "Arrived");
        assert_eq!(format_time_remaining(now + Duration::seconds(30), now), "Arriving soon");
        assert_eq!(format_time_remaining(now + Duration::seconds(90), now), "1 min");
        assert_eq!(format_time_remaining(now + Duration::minutes(45), now), "45 mins");
        assert_eq!(format_time_remaining(now + Duration::minutes(60), now), "1h 0m");
        assert_eq!(format_time_remaining(now + Duration::minutes(125), now), "2h 5m");
    }

    #[test]
    fn test_format_travel_time() {
        assert_eq!(format_travel_time(20.0), "Less than 1 min");
        assert_eq!(format_travel_time(75.0), "1 min");
        assert_eq!(format_travel_time(600.0), "10 mins");
        assert_eq!(format_travel_time(3_900.0), "1h 5m");
    }

    #[test]
    fn test_format_stop_offset() {
        assert_eq!(format_stop_offset(0), "Start");
        assert_eq!(format_stop_offset(25), "25m");
        assert_eq!(format_stop_offset(95), "1h 35m");
        assert_eq!(format_stop_offset(120), "2h 0m");
    }
}
