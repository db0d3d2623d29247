//! Tunables for proximity queries and tracking.

use std::time::Duration;

use crate::arrival::DEFAULT_AVERAGE_SPEED_KMH;
use crate::delay::DEFAULT_DELAY_THRESHOLD_MINUTES;
use crate::models::{ProximityError, Result};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProximityConfig {
    /// Speed used for arrival estimates
    pub average_speed_kmh: f64,

    /// Radius for "buses near me"
    pub nearby_bus_radius_km: f64,

    /// Radius for "closest stop" (exclusive)
    pub nearest_stop_radius_km: f64,

    /// Two fixes closer than this are the same place
    pub similarity_tolerance_m: f64,

    pub delay_threshold_minutes: i64,

    /// Positions kept in a [`LocationTrack`](crate::tracking::LocationTrack)
    pub max_history_points: usize,

    /// How often callers are expected to refresh positions
    #[cfg_attr(feature = "serde", serde(rename = "update_interval_ms", with = "millis"))]
    pub update_interval: Duration,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            nearby_bus_radius_km: 2.0,
            nearest_stop_radius_km: 1.0,
            similarity_tolerance_m: 50.0,
            delay_threshold_minutes: DEFAULT_DELAY_THRESHOLD_MINUTES,
            max_history_points: 100,
            update_interval: Duration::from_secs(5),
        }
    }
}

impl ProximityConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("average_speed_kmh", self.average_speed_kmh),
            ("nearby_bus_radius_km", self.nearby_bus_radius_km),
            ("nearest_stop_radius_km", self.nearest_stop_radius_km),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProximityError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !self.similarity_tolerance_m.is_finite() || self.similarity_tolerance_m < 0.0 {
            return Err(ProximityError::InvalidConfig(format!(
                "similarity_tolerance_m must be non-negative, got {}",
                self.similarity_tolerance_m
            )));
        }

        if self.max_history_points == 0 {
            return Err(ProximityError::InvalidConfig(
                "max_history_points must be at least 1".into(),
            ));
        }

        if self.update_interval.is_zero() {
            return Err(ProximityError::InvalidConfig(
                "update_interval must be non-zero".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
