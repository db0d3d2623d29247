//! Bounded history of reported bus positions.

use std::collections::VecDeque;

use tracing::trace;

use crate::models::{BusLocation, DistanceUnit, ProximityError, Result};
use crate::spatial::distance;

/// Most recent positions of a bus, oldest first
///
/// Once `capacity` entries are held, each push evicts the oldest one.
#[derive(Clone, Debug)]
pub struct LocationTrack {
    points: VecDeque<BusLocation>,
    capacity: usize,
}

impl LocationTrack {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ProximityError::InvalidConfig(
                "location track capacity must be at least 1".into(),
            ));
        }

        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    pub fn push(&mut self, location: BusLocation) {
        if self.points.len() == self.capacity {
            if let Some(evicted) = self.points.pop_front() {
                trace!(bus_id = %evicted.bus_id, "evicted oldest track point");
            }
        }
        self.points.push_back(location);
    }

    pub fn latest(&self) -> Option<&BusLocation> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &BusLocation> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Sum of the leg distances between consecutive points, in kilometers
    pub fn travelled_km(&self) -> f64 {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| distance(a.location, b.location, DistanceUnit::Kilometers))
            .sum()
    }
}
