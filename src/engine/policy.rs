//! Shift policy table and the fixed business constants of the timesheet.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Hard ceiling on any single day, break included.
pub const DAY_CEILING_HOURS: f64 = 24.0;
/// Above this the edit is accepted but a warning is surfaced.
pub const DAY_WARNING_HOURS: f64 = 22.0;
/// Hours credited for a full-day leave or an office holiday.
pub const FULL_DAY_HOURS: f64 = 9.5;
/// Hours credited for a half-day leave.
pub const HALF_DAY_HOURS: f64 = 4.75;
/// Longest single permission entry.
pub const PERMISSION_MAX_HOURS: f64 = 3.0;
/// Monthly permission budget, in count units (see [`permission_units`]).
pub const PERMISSION_MONTHLY_UNITS: u32 = 3;
/// An approved leave of at least this many hours covers the whole day.
pub const APPROVED_LEAVE_FULL_DAY_HOURS: f64 = 9.0;

/// Shift labels an employee can pick per day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum ShiftType {
    #[strum(serialize = "General Shift")]
    #[serde(rename = "General Shift")]
    General,
    #[strum(serialize = "Morning Shift")]
    #[serde(rename = "Morning Shift")]
    Morning,
    #[strum(serialize = "Evening Shift")]
    #[serde(rename = "Evening Shift")]
    Evening,
    #[strum(serialize = "Night Shift")]
    #[serde(rename = "Night Shift")]
    Night,
}

/// Per-shift minimums and the automatic break allowance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ShiftPolicy {
    pub min_hours: f64,
    pub max_hours: f64,
    pub break_minutes: u32,
}

impl ShiftPolicy {
    pub fn break_hours(&self) -> f64 {
        f64::from(self.break_minutes) / 60.0
    }
}

impl ShiftType {
    /// Policy row for this shift. Half shifts carry a shorter break.
    pub fn policy(self) -> ShiftPolicy {
        match self {
            ShiftType::General | ShiftType::Night => ShiftPolicy {
                min_hours: 9.5,
                max_hours: 12.0,
                break_minutes: 75,
            },
            ShiftType::Morning | ShiftType::Evening => ShiftPolicy {
                min_hours: 4.75,
                max_hours: 6.0,
                break_minutes: 30,
            },
        }
    }
}

/// Tier a permission entry into monthly count units: up to 1h costs 1 unit,
/// up to 2h costs 2, anything beyond costs 3. Zero-hour entries are free.
pub fn permission_units(hours: f64) -> u32 {
    if hours <= 0.0 {
        0
    } else if hours <= 1.0 {
        1
    } else if hours <= 2.0 {
        2
    } else {
        3
    }
}
