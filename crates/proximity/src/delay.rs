//! Delay classification and labels.

use crate::models::DelayClassification;

/// Delay at or above which a bus counts as significantly late
pub const DEFAULT_DELAY_THRESHOLD_MINUTES: i64 = 5;

impl DelayClassification {
    pub fn from_delay_minutes(delay_minutes: i64) -> Self {
        match delay_minutes {
            m if m <= 0 => Self::OnTime,
            1..=4 => Self::MinorDelay,
            5..=14 => Self::ModerateDelay,
            _ => Self::MajorDelay,
        }
    }
}

/// Display label for a delay.
///
/// Delays of 15 minutes or more are rounded to the nearest 5 minutes
/// (halves round up), so 17 reads as 15 and 18 as 20.
pub fn delay_message(delay_minutes: i64) -> String {
    match DelayClassification::from_delay_minutes(delay_minutes) {
        DelayClassification::OnTime => "On time".to_string(),
        DelayClassification::MinorDelay => format!("{delay_minutes} min delay"),
        DelayClassification::ModerateDelay => format!("{delay_minutes} mins delay"),
        DelayClassification::MajorDelay => {
            let rounded = (delay_minutes / 5 + i64::from(delay_minutes % 5 >= 3)) * 5;
            format!("{rounded} mins delay")
        }
    }
}

pub fn is_significantly_delayed(delay_minutes: i64, threshold_minutes: i64) -> bool {
    delay_minutes >= threshold_minutes
}

pub fn is_significantly_delayed_default(delay_minutes: i64) -> bool {
    is_significantly_delayed(delay_minutes, DEFAULT_DELAY_THRESHOLD_MINUTES)
}
