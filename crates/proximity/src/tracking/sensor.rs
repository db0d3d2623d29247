//! Pluggable position sources.
//!
//! The host application implements these over whatever it has (a browser
//! geolocation bridge, a platform location service, a replay file).

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};

use crate::models::{GeoPoint, Located, Result};

/// One reading from a position sensor
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    pub location: GeoPoint,
    /// Horizontal accuracy radius in meters, when the sensor reports one
    pub accuracy_m: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Located for PositionFix {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Read the device's current position
pub trait PositionSensor: Send + Sync {
    fn current_position<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<PositionFix>> + Send + 'a>>;
}
