//! Passenger load and route progress.

use crate::models::{OccupancyLevel, ProximityError, Result};

fn load_ratio(count: u32, capacity: u32) -> Result<f64> {
    if capacity == 0 {
        return Err(ProximityError::InvalidCapacity(capacity));
    }
    Ok(f64::from(count) / f64::from(capacity))
}

/// Load as a whole percentage, halves rounded up; may exceed 100 for an overcrowded bus
pub fn occupancy_percentage(count: u32, capacity: u32) -> Result<u64> {
    if capacity == 0 {
        return Err(ProximityError::InvalidCapacity(capacity));
    }
    let capacity = u64::from(capacity);
    Ok((u64::from(count) * 100 + capacity / 2) / capacity)
}

pub fn occupancy_level(count: u32, capacity: u32) -> Result<OccupancyLevel> {
    let ratio = load_ratio(count, capacity)?;

    let level = if ratio >= 1.0 {
        OccupancyLevel::Full
    } else if ratio >= 0.75 {
        OccupancyLevel::High
    } else if ratio >= 0.5 {
        OccupancyLevel::Moderate
    } else {
        OccupancyLevel::Low
    };
    Ok(level)
}

/// Percentage of the route completed once the bus is at `current_stop_index`
pub fn route_progress(total_stops: usize, current_stop_index: usize) -> u32 {
    if total_stops == 0 {
        return 0;
    }
    let percent = ((current_stop_index + 1) as f64 / total_stops as f64 * 100.0).round();
    percent.min(100.0) as u32
}
