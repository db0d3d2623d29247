//! Plain records for stops, bus positions and bus status.
//!
//! These are the shapes the backend hands the application; nothing here is
//! persisted by this crate.

use chrono::{DateTime, Utc};

use crate::identifiers::*;
use crate::models::traits::Located;
use crate::models::types::*;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusStop {
    pub id: StopIdentifier,
    pub name: String,
    pub location: GeoPoint,
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: Option<String>,
}

impl BusStop {
    pub fn new(id: impl Into<StopIdentifier>, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            area: None,
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

impl Located for BusStop {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// A single reported position of a bus
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusLocation {
    pub bus_id: BusIdentifier,
    pub location: GeoPoint,
    pub speed_kmh: f64,
    /// Heading in degrees, 0 = north
    pub heading_deg: f64,
    pub timestamp: DateTime<Utc>,
}

impl Located for BusLocation {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Snapshot of where a bus is on its route and how it is doing
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusStatusReport {
    pub bus_id: BusIdentifier,
    pub current_stop: Option<BusStop>,
    pub next_stop: Option<BusStop>,
    pub passengers_count: u32,
    pub capacity: u32,
    /// Minutes behind schedule; negative when early
    pub delay_minutes: i64,
    pub status: BusStatus,
    pub estimated_arrival: DateTime<Utc>,
}

impl BusStatusReport {
    pub fn occupancy_percentage(&self) -> Result<u64> {
        crate::occupancy::occupancy_percentage(self.passengers_count, self.capacity)
    }

    pub fn occupancy_level(&self) -> Result<OccupancyLevel> {
        crate::occupancy::occupancy_level(self.passengers_count, self.capacity)
    }

    pub fn delay_classification(&self) -> DelayClassification {
        DelayClassification::from_delay_minutes(self.delay_minutes)
    }

    pub fn delay_message(&self) -> String {
        crate::delay::delay_message(self.delay_minutes)
    }

    pub fn is_significantly_delayed(&self, threshold_minutes: i64) -> bool {
        crate::delay::is_significantly_delayed(self.delay_minutes, threshold_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stop(id: &str, lat: f64, lng: f64) -> BusStop {
        BusStop::new(id, id.to_uppercase(), GeoPoint::new(lat, lng).unwrap())
    }

    #[test]
    fn test_bus_stop_builder() {
        let s = stop("periyar", 9.9177, 78.1116).with_area("Madurai Central");
        assert_eq!(s.id, StopIdentifier::new("periyar"));
        assert_eq!(s.name, "PERIYAR");
        assert_eq!(s.area.as_deref(), Some("Madurai Central"));
        assert_eq!(s.location().latitude(), 9.9177);
    }

    #[test]
    fn test_status_report_accessors() {
        let report = BusStatusReport {
            bus_id: BusIdentifier::new("bus_7"),
            current_stop: Some(stop("a", 28.7041, 77.1025)),
            next_stop: Some(stop("b", 28.7101, 77.1075)),
            passengers_count: 38,
            capacity: 50,
            delay_minutes: 7,
            status: BusStatus::Delayed,
            estimated_arrival: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        };

        assert_eq!(report.occupancy_percentage().unwrap(), 76);
        assert_eq!(report.occupancy_level().unwrap(), OccupancyLevel::High);
        assert_eq!(report.delay_classification(), DelayClassification::ModerateDelay);
        assert_eq!(report.delay_message(), "7 mins delay");
        assert!(report.is_significantly_delayed(5));
        assert!(!report.is_significantly_delayed(10));
    }

    #[test]
    fn test_status_report_zero_capacity() {
        let report = BusStatusReport {
            bus_id: BusIdentifier::new("bus_0"),
            current_stop: None,
            next_stop: None,
            passengers_count: 0,
            capacity: 0,
            delay_minutes: 0,
            status: BusStatus::NotStarted,
            estimated_arrival: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        };

        assert!(matches!(
            report.occupancy_level(),
            Err(ProximityError::InvalidCapacity(0))
        ));
    }
}
