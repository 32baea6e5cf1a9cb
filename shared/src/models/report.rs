//! Report Models

use serde::{Deserialize, Serialize};

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Paid order volume for one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekVolume {
    /// 0 = Sunday
    pub day_index: u8,
    pub day: String,
    pub orders: i64,
    pub drinks: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOfWeekReport {
    pub days: Vec<DayOfWeekVolume>,
    pub total_orders: i64,
    pub total_drinks: i64,
}
