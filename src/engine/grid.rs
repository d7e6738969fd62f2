//! In-memory shape of one weekly timesheet: the row grid, the per-day shift
//! picks and the on-premises envelope. This is also the JSON document the
//! store persists, one per employee per ISO week.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use super::policy::{self, ShiftType};

pub const DAYS_PER_WEEK: usize = 7;
/// Monday-first day labels used in every user-facing message.
pub const DAY_LABELS: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub const TASK_PERMISSION: &str = "Permission";
pub const TASK_FULL_DAY_LEAVE: &str = "Full Day Leave";
pub const TASK_HALF_DAY_LEAVE: &str = "Half Day Leave";
pub const TASK_OFFICE_HOLIDAY: &str = "Office Holiday";
/// System rows created from an approved leave request carry this prefix,
/// e.g. "Leave Approved (Annual)".
pub const APPROVED_LEAVE_PREFIX: &str = "Leave Approved";

/// Which fields of a row are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind")]
pub enum EntryKind {
    Project {
        #[serde(default)]
        label: String,
        #[serde(default)]
        code: String,
    },
    Leave,
}

/// One row of the timesheet grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeekEntry {
    #[serde(flatten)]
    pub kind: EntryKind,
    /// Task name for project rows; leave-type label for leave rows.
    #[serde(default)]
    pub task: String,
    /// Hours per day, Monday first.
    #[schema(value_type = Vec<f64>)]
    pub daily_hours: [f64; DAYS_PER_WEEK],
    /// System-inserted rows (office holidays) the user may not touch.
    #[serde(default)]
    pub locked: bool,
    /// Per-day lock, set when an approved full-day leave consumes the day.
    #[serde(default)]
    #[schema(value_type = Vec<bool>)]
    pub locked_days: [bool; DAYS_PER_WEEK],
}

impl WeekEntry {
    pub fn empty_project() -> Self {
        WeekEntry {
            kind: EntryKind::Project {
                label: String::new(),
                code: String::new(),
            },
            task: String::new(),
            daily_hours: [0.0; DAYS_PER_WEEK],
            locked: false,
            locked_days: [false; DAYS_PER_WEEK],
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self.kind, EntryKind::Project { .. })
    }

    pub fn project_label(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Project { label, .. } => Some(label.as_str()),
            EntryKind::Leave => None,
        }
    }

    pub fn is_permission(&self) -> bool {
        !self.is_project() && self.task == TASK_PERMISSION
    }

    pub fn is_full_day_leave(&self) -> bool {
        !self.is_project() && self.task == TASK_FULL_DAY_LEAVE
    }

    pub fn is_half_day_leave(&self) -> bool {
        !self.is_project() && self.task == TASK_HALF_DAY_LEAVE
    }

    pub fn is_office_holiday(&self) -> bool {
        self.task == TASK_OFFICE_HOLIDAY
    }

    pub fn is_approved_leave(&self) -> bool {
        !self.is_project() && self.task.starts_with(APPROVED_LEAVE_PREFIX)
    }

    /// True once hours on day `i` of this row shut out every other row.
    pub fn covers_day(&self, day: usize) -> bool {
        let h = self.daily_hours[day];
        if h <= 0.0 {
            return false;
        }
        self.is_full_day_leave()
            || self.is_office_holiday()
            || (self.is_approved_leave() && h >= policy::APPROVED_LEAVE_FULL_DAY_HOURS)
    }
}

/// Attendance-derived "present" envelope for the week. Advisory input: the
/// engine never writes it back, it only caps claimable project hours.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct OnPremises {
    #[schema(value_type = Vec<f64>)]
    pub daily: [f64; DAYS_PER_WEEK],
    pub weekly: f64,
}

impl OnPremises {
    pub fn from_daily(daily: [f64; DAYS_PER_WEEK]) -> Self {
        let weekly = daily.iter().sum();
        OnPremises { daily, weekly }
    }

    pub fn is_empty(&self) -> bool {
        self.daily.iter().all(|&h| h <= 0.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema, Default,
)]
pub enum TimesheetStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

/// The persisted weekly aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyTimesheet {
    /// Monday of the week, date-only.
    #[schema(value_type = String, format = "date")]
    pub week_start: NaiveDate,
    /// Sunday of the same week.
    #[schema(value_type = String, format = "date")]
    pub week_end: NaiveDate,
    pub entries: Vec<WeekEntry>,
    /// Selected shift per day, Monday first; `None` until the user picks one.
    #[schema(value_type = Vec<Option<String>>)]
    pub daily_shifts: [Option<ShiftType>; DAYS_PER_WEEK],
    #[serde(default)]
    pub on_premises: OnPremises,
    #[serde(default)]
    pub status: TimesheetStatus,
    /// Redundantly persisted Σ(work) + Σ(break).
    #[serde(default)]
    pub total_hours: f64,
}

impl WeeklyTimesheet {
    /// Fresh draft for the week containing `anchor`: one empty project row,
    /// plus a locked Office Holiday row when the week holds configured
    /// holidays.
    pub fn for_week(anchor: NaiveDate, holidays: &[NaiveDate]) -> Self {
        let week_start = monday_of(anchor);
        let week_end = week_start + Duration::days(6);

        let mut entries = vec![WeekEntry::empty_project()];

        let mut holiday_hours = [0.0; DAYS_PER_WEEK];
        let mut any_holiday = false;
        for &d in holidays {
            if d >= week_start && d <= week_end {
                let idx = (d - week_start).num_days() as usize;
                holiday_hours[idx] = policy::FULL_DAY_HOURS;
                any_holiday = true;
            }
        }
        if any_holiday {
            entries.push(WeekEntry {
                kind: EntryKind::Leave,
                task: TASK_OFFICE_HOLIDAY.to_string(),
                daily_hours: holiday_hours,
                locked: true,
                locked_days: [false; DAYS_PER_WEEK],
            });
        }

        WeeklyTimesheet {
            week_start,
            week_end,
            entries,
            daily_shifts: [None; DAYS_PER_WEEK],
            on_premises: OnPremises::default(),
            status: TimesheetStatus::Draft,
            total_hours: 0.0,
        }
    }

    /// Calendar date of day index `i` (0 = Monday).
    pub fn date_of(&self, day: usize) -> NaiveDate {
        self.week_start + Duration::days(day as i64)
    }

    /// Day is a configured office holiday (a locked holiday row carries
    /// hours on it), which lifts the shift-selection requirement.
    pub fn is_holiday(&self, day: usize) -> bool {
        self.entries
            .iter()
            .any(|e| e.locked && e.is_office_holiday() && e.daily_hours[day] > 0.0)
    }

    /// Appending rows is always allowed; removal keeps at least one row.
    pub fn can_remove_row(&self) -> bool {
        self.entries.iter().filter(|e| !e.locked).count() > 1
    }
}

/// Normalize any date to the Monday of its ISO week.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// ISO week bounds (Monday, Sunday) for the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = monday_of(date);
    (start, start + Duration::days(6))
}

/// True for Saturday/Sunday indices.
pub fn is_weekend(day: usize) -> bool {
    day >= 5
}
