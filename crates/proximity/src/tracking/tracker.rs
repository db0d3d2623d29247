//! Distance and arrival reports toward a fixed destination.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::arrival::{estimated_arrival, format_time_remaining};
use crate::config::ProximityConfig;
use crate::models::{DistanceUnit, GeoPoint, Located, Result};
use crate::spatial::{are_locations_similar, bearing, distance};
use crate::tracking::sensor::PositionSensor;

/// Everything a screen needs to show "how far, which way, how long"
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProximityReport {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub distance_km: f64,
    pub bearing_deg: f64,
    pub eta: DateTime<Utc>,
    pub time_remaining: String,
    /// Origin is within the configured similarity tolerance of the destination
    pub at_destination: bool,
}

/// Computes [`ProximityReport`]s toward one destination
///
/// Holds no position state; callers decide when to ask again.
#[derive(Clone, Debug)]
pub struct ProximityTracker {
    destination: GeoPoint,
    config: ProximityConfig,
}

impl ProximityTracker {
    pub fn new(destination: GeoPoint, config: ProximityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { destination, config })
    }

    pub fn destination(&self) -> GeoPoint {
        self.destination
    }

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    /// Point the tracker at a new destination, e.g. when the bus moves
    pub fn set_destination(&mut self, destination: GeoPoint) {
        self.destination = destination;
    }

    pub fn report(&self, origin: impl Located, now: DateTime<Utc>) -> Result<ProximityReport> {
        let origin = origin.location();
        let distance_km = distance(origin, self.destination, DistanceUnit::Kilometers);
        let eta = estimated_arrival(origin, self.destination, self.config.average_speed_kmh, now)?;

        let report = ProximityReport {
            origin,
            destination: self.destination,
            distance_km,
            bearing_deg: bearing(origin, self.destination),
            eta,
            time_remaining: format_time_remaining(eta, now),
            at_destination: are_locations_similar(
                origin,
                self.destination,
                self.config.similarity_tolerance_m,
            ),
        };

        debug!(
            distance_km = report.distance_km,
            bearing_deg = report.bearing_deg,
            time_remaining = %report.time_remaining,
            "proximity report"
        );
        Ok(report)
    }

    /// Read one fix from `sensor` and report from there
    pub async fn refresh(
        &self,
        sensor: &dyn PositionSensor,
        now: DateTime<Utc>,
    ) -> Result<ProximityReport> {
        let fix = sensor.current_position().await?;
        self.report(fix, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;

    use chrono::{Duration, TimeZone};

    use crate::models::{ProximityError, SensorError};
    use crate::tracking::sensor::PositionFix;

    struct FixedSensor(Result<PositionFix>);

    impl PositionSensor for FixedSensor {
        fn current_position<'a>(
            &'a self,
        ) -> Pin<Box<dyn Future<Output = Result<PositionFix>> + Send + 'a>> {
            let outcome = match &self.0 {
                Ok(fix) => Ok(*fix),
                Err(ProximityError::Sensor(e)) => Err(ProximityError::Sensor(*e)),
                Err(_) => Err(ProximityError::Sensor(SensorError::PositionUnavailable)),
            };
            Box::pin(async move { outcome })
        }
    }

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, 7, 45, 0).unwrap()
    }

    #[test]
    fn test_new_validates_config() {
        let config = ProximityConfig {
            average_speed_kmh: -1.0,
            ..Default::default()
        };
        assert!(ProximityTracker::new(pt(0.0, 0.0), config).is_err());
    }

    #[test]
    fn test_report_toward_destination() {
        let config = ProximityConfig {
            average_speed_kmh: 40.0,
            ..Default::default()
        };
        let tracker = ProximityTracker::new(pt(9.9252, 78.1198), config).unwrap();

        let report = tracker.report(pt(9.9300, 78.1250), now()).unwrap();
        assert_eq!(report.distance_km, 0.78);
        assert_eq!(report.eta, now() + Duration::minutes(1));
        assert_eq!(report.time_remaining, "1 min");
        assert!(!report.at_destination);
        assert!((report.bearing_deg - 226.86).abs() < 0.05);
    }

    #[test]
    fn test_report_at_destination() {
        let tracker = ProximityTracker::new(pt(9.9252, 78.1198), ProximityConfig::default()).unwrap();

        let report = tracker.report(pt(9.9253, 78.1198), now()).unwrap();
        assert!(report.at_destination);
        assert_eq!(report.time_remaining, "Arrived");
    }

    #[test]
    fn test_set_destination() {
        let mut tracker = ProximityTracker::new(pt(0.0, 0.0), ProximityConfig::default()).unwrap();
        tracker.set_destination(pt(1.0, 1.0));
        assert_eq!(tracker.destination(), pt(1.0, 1.0));
    }

    #[test]
    fn test_refresh_reads_sensor() {
        let tracker = ProximityTracker::new(pt(9.9252, 78.1198), ProximityConfig::default()).unwrap();
        let sensor = FixedSensor(Ok(PositionFix {
            location: pt(9.9300, 78.1250),
            accuracy_m: Some(12.0),
            timestamp: now(),
        }));

        let report = pollster::block_on(tracker.refresh(&sensor, now())).unwrap();
        assert_eq!(report.origin, pt(9.9300, 78.1250));
        // 0.78 km at the default 30 km/h
        assert_eq!(report.time_remaining, "2 mins");
    }

    #[test]
    fn test_refresh_propagates_sensor_error() {
        let tracker = ProximityTracker::new(pt(9.9252, 78.1198), ProximityConfig::default()).unwrap();
        let sensor = FixedSensor(Err(SensorError::PermissionDenied.into()));

        let err = pollster::block_on(tracker.refresh(&sensor, now())).unwrap_err();
        assert!(matches!(err, ProximityError::Sensor(SensorError::PermissionDenied)));
    }
}
