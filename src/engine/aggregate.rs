//! Daily and weekly aggregation over the timesheet grid. Everything here is
//! recomputed from the full row list on demand; there is no cached state to
//! invalidate.

use serde::Serialize;
use utoipa::ToSchema;

use super::grid::{DAYS_PER_WEEK, WeeklyTimesheet};
use super::policy;

/// Work hours across all rows for day `i`, every kind included.
pub fn work_total(sheet: &WeeklyTimesheet, day: usize) -> f64 {
    sheet.entries.iter().map(|e| e.daily_hours[day]).sum()
}

/// Any real project work on day `i` (office-holiday rows do not count).
pub fn has_project_work(sheet: &WeeklyTimesheet, day: usize) -> bool {
    sheet
        .entries
        .iter()
        .any(|e| e.is_project() && !e.is_office_holiday() && e.daily_hours[day] > 0.0)
}

/// Any hours on day `i` from a system "Leave Approved…" row.
pub fn has_approved_leave(sheet: &WeeklyTimesheet, day: usize) -> bool {
    sheet
        .entries
        .iter()
        .any(|e| e.is_approved_leave() && e.daily_hours[day] > 0.0)
}

/// A partial-day leave (half day or permission) on day `i` relaxes the
/// on-premises cap for project rows.
pub fn has_partial_leave(sheet: &WeeklyTimesheet, day: usize) -> bool {
    sheet
        .entries
        .iter()
        .any(|e| (e.is_half_day_leave() || e.is_permission()) && e.daily_hours[day] > 0.0)
}

/// Break accrued on day `i`: the selected shift's allowance, applied only
/// when the day holds project work and no approved leave.
pub fn break_hours(sheet: &WeeklyTimesheet, day: usize) -> f64 {
    if !has_project_work(sheet, day) || has_approved_leave(sheet, day) {
        return 0.0;
    }
    sheet.daily_shifts[day]
        .map(|s| s.policy().break_hours())
        .unwrap_or(0.0)
}

pub fn total_with_break(sheet: &WeeklyTimesheet, day: usize) -> f64 {
    work_total(sheet, day) + break_hours(sheet, day)
}

/// Day `i` is fully consumed by a leave/holiday row; nothing else may hold
/// hours on it.
pub fn day_fully_covered(sheet: &WeeklyTimesheet, day: usize) -> bool {
    sheet.entries.iter().any(|e| e.covers_day(day))
}

/// Sum of project-row hours on day `i`, excluding `skip_row` when given.
pub fn project_hours(sheet: &WeeklyTimesheet, day: usize, skip_row: Option<usize>) -> f64 {
    sheet
        .entries
        .iter()
        .enumerate()
        .filter(|(i, e)| Some(*i) != skip_row && e.is_project() && !e.is_office_holiday())
        .map(|(_, e)| e.daily_hours[day])
        .sum()
}

/// Snapshot of derived totals returned to the client alongside the document.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DerivedTotals {
    #[schema(value_type = Vec<f64>)]
    pub daily_work: [f64; DAYS_PER_WEEK],
    #[schema(value_type = Vec<f64>)]
    pub daily_break: [f64; DAYS_PER_WEEK],
    #[schema(value_type = Vec<f64>)]
    pub daily_total: [f64; DAYS_PER_WEEK],
    pub weekly_total: f64,
}

/// Recompute all per-day and weekly totals from scratch.
pub fn derive_totals(sheet: &WeeklyTimesheet) -> DerivedTotals {
    let mut daily_work = [0.0; DAYS_PER_WEEK];
    let mut daily_break = [0.0; DAYS_PER_WEEK];
    let mut daily_total = [0.0; DAYS_PER_WEEK];
    for day in 0..DAYS_PER_WEEK {
        daily_work[day] = work_total(sheet, day);
        daily_break[day] = break_hours(sheet, day);
        daily_total[day] = daily_work[day] + daily_break[day];
    }
    DerivedTotals {
        daily_work,
        daily_break,
        daily_total,
        weekly_total: daily_total.iter().sum(),
    }
}

/// Permission units this sheet holds inside the given calendar month.
/// Used to fold other persisted weeks into the monthly quota.
pub fn permission_units_in_month(sheet: &WeeklyTimesheet, year: i32, month: u32) -> u32 {
    units_in_month(sheet, year, month, None)
}

/// Month-to-date permission units held inside this sheet for the calendar
/// month of day `day`, excluding the cell being edited.
pub fn sheet_permission_units(
    sheet: &WeeklyTimesheet,
    day: usize,
    exclude: Option<(usize, usize)>,
) -> u32 {
    use chrono::Datelike;
    let date = sheet.date_of(day);
    units_in_month(sheet, date.year(), date.month(), exclude)
}

fn units_in_month(
    sheet: &WeeklyTimesheet,
    year: i32,
    month: u32,
    exclude: Option<(usize, usize)>,
) -> u32 {
    use chrono::Datelike;
    let mut units = 0;
    for (row_idx, entry) in sheet.entries.iter().enumerate() {
        if !entry.is_permission() {
            continue;
        }
        for day in 0..DAYS_PER_WEEK {
            if exclude == Some((row_idx, day)) {
                continue;
            }
            let date = sheet.date_of(day);
            if date.month() == month && date.year() == year {
                units += policy::permission_units(entry.daily_hours[day]);
            }
        }
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::{
        EntryKind, TASK_FULL_DAY_LEAVE, TASK_PERMISSION, WeekEntry, WeeklyTimesheet,
    };
    use crate::engine::policy::ShiftType;
    use chrono::NaiveDate;

    fn sheet() -> WeeklyTimesheet {
        // Week of Mon 2026-08-17
        WeeklyTimesheet::for_week(NaiveDate::from_ymd_opt(2026, 8, 17).unwrap(), &[])
    }

    fn leave_row(task: &str) -> WeekEntry {
        WeekEntry {
            kind: EntryKind::Leave,
            task: task.to_string(),
            daily_hours: [0.0; 7],
            locked: false,
            locked_days: [false; 7],
        }
    }

    #[test]
    fn break_applies_only_with_project_work() {
        let mut ts = sheet();
        ts.daily_shifts[0] = Some(ShiftType::General);
        assert_eq!(break_hours(&ts, 0), 0.0);

        ts.entries[0].daily_hours[0] = 8.0;
        assert_eq!(break_hours(&ts, 0), 1.25);
        assert_eq!(total_with_break(&ts, 0), 9.25);

        // no shift selected, no break
        ts.entries[0].daily_hours[1] = 4.0;
        assert_eq!(break_hours(&ts, 1), 0.0);
    }

    #[test]
    fn approved_leave_suppresses_break() {
        let mut ts = sheet();
        ts.daily_shifts[0] = Some(ShiftType::General);
        ts.entries[0].daily_hours[0] = 4.0;
        let mut leave = leave_row("Leave Approved (Sick)");
        leave.daily_hours[0] = 4.0;
        ts.entries.push(leave);

        assert!(has_approved_leave(&ts, 0));
        assert_eq!(break_hours(&ts, 0), 0.0);
        assert_eq!(work_total(&ts, 0), 8.0);
    }

    #[test]
    fn full_day_leave_covers_day() {
        let mut ts = sheet();
        let mut leave = leave_row(TASK_FULL_DAY_LEAVE);
        leave.daily_hours[2] = 9.5;
        ts.entries.push(leave);
        assert!(day_fully_covered(&ts, 2));
        assert!(!day_fully_covered(&ts, 3));
    }

    #[test]
    fn permission_counts_as_partial_leave() {
        let mut ts = sheet();
        let mut perm = leave_row(TASK_PERMISSION);
        perm.daily_hours[1] = 2.0;
        ts.entries.push(perm);
        assert!(has_partial_leave(&ts, 1));
        assert!(!has_partial_leave(&ts, 0));
    }

    #[test]
    fn derive_totals_sums_week() {
        let mut ts = sheet();
        ts.daily_shifts[0] = Some(ShiftType::General);
        ts.daily_shifts[1] = Some(ShiftType::Morning);
        ts.entries[0].daily_hours[0] = 8.0;
        ts.entries[0].daily_hours[1] = 4.0;

        let t = derive_totals(&ts);
        assert_eq!(t.daily_total[0], 9.25); // 8 + 75min
        assert_eq!(t.daily_total[1], 4.5); // 4 + 30min
        assert_eq!(t.weekly_total, 13.75);
    }

    #[test]
    fn sheet_permission_units_scoped_to_month() {
        // Week Mon 2026-06-29 .. Sun 2026-07-05 straddles a month boundary.
        let mut ts =
            WeeklyTimesheet::for_week(NaiveDate::from_ymd_opt(2026, 6, 29).unwrap(), &[]);
        let mut perm = leave_row(TASK_PERMISSION);
        perm.daily_hours[0] = 1.0; // June 29 -> 1 unit in June
        perm.daily_hours[3] = 2.0; // July 2  -> 2 units in July
        ts.entries.push(perm);

        // Editing a June day only sees June usage.
        assert_eq!(sheet_permission_units(&ts, 0, None), 1);
        // Editing a July day only sees July usage.
        assert_eq!(sheet_permission_units(&ts, 3, None), 2);
        // Excluding the edited cell removes its own contribution.
        assert_eq!(sheet_permission_units(&ts, 3, Some((1, 3))), 0);
    }
}
