//! Core value types and enums for proximity calculations.

use geo::Point;

// ============================================================================
// Coordinates
// ============================================================================

/// A validated latitude/longitude pair in degrees.
///
/// Construction rejects non-finite values, latitudes outside `[-90, 90]` and
/// longitudes outside `[-180, 180]`, so every calculation downstream can assume
/// well-formed input.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGeoPoint"))]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lng_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);

        if !lat_ok || !lng_ok {
            return Err(ProximityError::InvalidCoordinate { latitude, longitude });
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<GeoPoint> for Point {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.longitude, p.latitude)
    }
}

impl TryFrom<Point> for GeoPoint {
    type Error = ProximityError;

    fn try_from(p: Point) -> Result<Self> {
        GeoPoint::new(p.y(), p.x())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = ProximityError;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

// ============================================================================
// Enums
// ============================================================================

const MILES_PER_KILOMETER: f64 = 0.621371;

/// Unit a distance is reported in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceUnit {
    #[default]
    #[strum(to_string = "kilometers", serialize = "km")]
    Kilometers,
    #[strum(to_string = "meters", serialize = "m")]
    Meters,
    #[strum(to_string = "miles", serialize = "mi")]
    Miles,
}

impl DistanceUnit {
    /// Convert a distance in kilometers into this unit
    pub fn convert(self, km: f64) -> f64 {
        match self {
            Self::Kilometers => km,
            Self::Meters => km * 1000.0,
            Self::Miles => km * MILES_PER_KILOMETER,
        }
    }
}

/// Operational status of a bus on its route
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BusStatus {
    OnTime,
    Delayed,
    Completed,
    NotStarted,
}

impl BusStatus {
    /// Hex colour used for this status on map markers
    pub fn color(self) -> &'static str {
        match self {
            Self::OnTime => "#10b981",
            Self::Delayed => "#f97316",
            Self::Completed => "#8b5cf6",
            Self::NotStarted => "#6b7280",
        }
    }
}

/// Mechanical health of a bus as reported by the depot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BusHealth {
    Good,
    Warning,
    Critical,
}

impl BusHealth {
    /// Hex colour used for this health state on map markers
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#10b981",
            Self::Warning => "#f97316",
            Self::Critical => "#ef4444",
        }
    }
}

/// Severity bucket for a delay in minutes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DelayClassification {
    OnTime,
    MinorDelay,
    ModerateDelay,
    MajorDelay,
}

/// How full a bus is relative to its capacity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OccupancyLevel {
    Low,
    Moderate,
    High,
    Full,
}

// ============================================================================
// Errors
// ============================================================================

/// Failures reported by a device position sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("Permission denied. Please enable location access in settings.")]
    PermissionDenied,

    #[error("Location information is unavailable.")]
    PositionUnavailable,

    #[error("The request to get the current location timed out.")]
    Timeout,

    #[error("Geolocation is not supported on this device.")]
    Unsupported,
}

#[derive(Debug, thiserror::Error)]
pub enum ProximityError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid average speed: {0} km/h")]
    InvalidSpeed(f64),

    #[error("Arrival at {average_speed_kmh} km/h over {distance_km} km is out of range")]
    EtaOutOfRange { distance_km: f64, average_speed_kmh: f64 },

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Position sensor failed: {0}")]
    Sensor(#[from] SensorError),
}

pub type Result<T> = std::result::Result<T, ProximityError>;
