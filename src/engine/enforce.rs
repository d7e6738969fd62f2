//! Edit-time validation reducer: one proposed cell edit in, either the
//! accepted (possibly clamped) value or a structured rejection out.
//!
//! `apply_edit` is deterministic over its arguments; the only state it
//! touches is the sheet passed in, so the whole rule set is testable as a
//! pure function.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::aggregate;
use super::error::{EngineError, NotEditableReason};
use super::grid::{DAYS_PER_WEEK, TimesheetStatus, WeeklyTimesheet};
use super::policy;
use super::timecodec;

/// A proposed change to one cell of the grid.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Edit {
    pub row: usize,
    /// Day index, 0 = Monday.
    pub day: usize,
    /// Raw user input: `H:MM` or decimal hours.
    pub input: String,
}

/// What an accepted edit settled on.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EditOutcome {
    /// The value actually written, after snapping and capping.
    pub value: f64,
    /// Non-blocking caution (22–24h days).
    pub warning: Option<String>,
}

/// Validate and apply one edit. On success the cell is written, exclusivity
/// is re-established and `total_hours` is refreshed; on rejection the sheet
/// is untouched.
///
/// `prior_permission_units` is the month-to-date permission usage persisted
/// in *other* weeks of the edited day's month; this sheet's own usage is
/// counted here.
pub fn apply_edit(
    sheet: &mut WeeklyTimesheet,
    edit: &Edit,
    prior_permission_units: u32,
) -> Result<EditOutcome, EngineError> {
    check_editable(sheet, edit)?;

    let proposed = timecodec::parse_hhmm_input(&edit.input);

    let warning = check_day_ceiling(sheet, edit, proposed)?;
    let value = clamp_for_task(sheet, edit, proposed, prior_permission_units)?;

    let entry = &mut sheet.entries[edit.row];
    entry.daily_hours[edit.day] = value;

    if sheet.entries[edit.row].covers_day(edit.day) {
        enforce_exclusivity(sheet, edit.row, edit.day);
    }

    sheet.total_hours = aggregate::derive_totals(sheet).weekly_total;

    Ok(EditOutcome { value, warning })
}

/// Step 1: is this cell editable at all?
fn check_editable(sheet: &WeeklyTimesheet, edit: &Edit) -> Result<(), NotEditableReason> {
    if sheet.status != TimesheetStatus::Draft {
        return Err(NotEditableReason::NotDraft);
    }
    if edit.day >= DAYS_PER_WEEK {
        return Err(NotEditableReason::NoSuchDay);
    }
    let entry = sheet
        .entries
        .get(edit.row)
        .ok_or(NotEditableReason::NoSuchRow)?;

    if entry.locked {
        return Err(NotEditableReason::RowLocked);
    }
    if entry.locked_days[edit.day] {
        return Err(NotEditableReason::DayLocked);
    }
    if sheet.daily_shifts[edit.day].is_none() {
        return Err(NotEditableReason::ShiftMissing);
    }
    if entry.task.is_empty() {
        return Err(NotEditableReason::TaskMissing);
    }
    if entry
        .project_label()
        .is_some_and(|label| label.is_empty())
    {
        return Err(NotEditableReason::ProjectMissing);
    }
    // A day consumed by another row's full-day leave/holiday is off limits
    // unless the edited row is itself the covering entry.
    let covered_by_other = sheet
        .entries
        .iter()
        .enumerate()
        .any(|(i, e)| i != edit.row && e.covers_day(edit.day));
    if covered_by_other {
        return Err(NotEditableReason::DayCovered);
    }
    Ok(())
}

/// Step 3: 24h hard ceiling with a soft warning band above 22h.
fn check_day_ceiling(
    sheet: &WeeklyTimesheet,
    edit: &Edit,
    proposed: f64,
) -> Result<Option<String>, EngineError> {
    let others: f64 = sheet
        .entries
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != edit.row)
        .map(|(_, e)| e.daily_hours[edit.day])
        .sum();

    let project_after = aggregate::project_hours(sheet, edit.day, Some(edit.row)) > 0.0
        || (sheet.entries[edit.row].is_project() && proposed > 0.0);
    let break_after = if project_after && !aggregate::has_approved_leave(sheet, edit.day) {
        sheet.daily_shifts[edit.day]
            .map(|s| s.policy().break_hours())
            .unwrap_or(0.0)
    } else {
        0.0
    };

    let after = others + proposed + break_after;
    if after > policy::DAY_CEILING_HOURS {
        return Err(EngineError::BoundExceeded {
            current: timecodec::format_hours_hhmm(aggregate::total_with_break(sheet, edit.day)),
            after: timecodec::format_hours_hhmm(after),
        });
    }
    if after >= policy::DAY_WARNING_HOURS {
        return Ok(Some(format!(
            "Day total {} is unusually high",
            timecodec::format_hours_hhmm(after)
        )));
    }
    Ok(None)
}

/// Step 4: task-specific snapping and capping.
fn clamp_for_task(
    sheet: &WeeklyTimesheet,
    edit: &Edit,
    proposed: f64,
    prior_permission_units: u32,
) -> Result<f64, EngineError> {
    let entry = &sheet.entries[edit.row];

    if entry.is_office_holiday() || entry.is_full_day_leave() {
        return Ok(if proposed > 0.0 { policy::FULL_DAY_HOURS } else { 0.0 });
    }

    if entry.is_half_day_leave() {
        return Ok(if proposed > 0.0 { policy::HALF_DAY_HOURS } else { 0.0 });
    }

    if entry.is_permission() {
        if proposed > policy::PERMISSION_MAX_HOURS {
            return Err(EngineError::PermissionTooLong { hours: proposed });
        }
        if proposed > 0.0 {
            let taken_elsewhere = sheet
                .entries
                .iter()
                .enumerate()
                .any(|(i, e)| i != edit.row && e.is_permission() && e.daily_hours[edit.day] > 0.0);
            if taken_elsewhere {
                return Err(NotEditableReason::PermissionTaken.into());
            }
        }
        let used = prior_permission_units
            + aggregate::sheet_permission_units(sheet, edit.day, Some((edit.row, edit.day)));
        let attempted = policy::permission_units(proposed);
        if used + attempted > policy::PERMISSION_MONTHLY_UNITS {
            return Err(EngineError::QuotaExceeded { used, attempted });
        }
        return Ok(proposed);
    }

    if entry.is_project() {
        let on_prem = sheet.on_premises.daily[edit.day];
        if on_prem <= 0.0 {
            // Partial-day leave lifts the zero-presence rule; kept as the
            // source behaves, pending product clarification.
            if aggregate::has_partial_leave(sheet, edit.day) {
                return Ok(proposed);
            }
            return Ok(0.0);
        }
        // Same break rule as the aggregator: no deduction on approved-leave
        // days.
        let break_h = if aggregate::has_approved_leave(sheet, edit.day) {
            0.0
        } else {
            sheet.daily_shifts[edit.day]
                .map(|s| s.policy().break_hours())
                .unwrap_or(0.0)
        };
        let other_project = aggregate::project_hours(sheet, edit.day, Some(edit.row));
        let cap = (on_prem - break_h - other_project).max(0.0);
        return Ok(proposed.min(cap));
    }

    // Other leave kinds (approved-leave rows are locked per day, so this is
    // plain manual leave) pass through unclamped.
    Ok(proposed)
}

/// Zero out every other row on a day newly consumed by `covering_row`.
fn enforce_exclusivity(sheet: &mut WeeklyTimesheet, covering_row: usize, day: usize) {
    for (i, entry) in sheet.entries.iter_mut().enumerate() {
        if i != covering_row {
            entry.daily_hours[day] = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::{
        EntryKind, TASK_FULL_DAY_LEAVE, TASK_HALF_DAY_LEAVE, TASK_OFFICE_HOLIDAY,
        TASK_PERMISSION, WeekEntry, WeeklyTimesheet,
    };
    use crate::engine::policy::ShiftType;
    use chrono::NaiveDate;

    fn edit(row: usize, day: usize, input: &str) -> Edit {
        Edit {
            row,
            day,
            input: input.to_string(),
        }
    }

    fn project_row(label: &str) -> WeekEntry {
        WeekEntry {
            kind: EntryKind::Project {
                label: label.to_string(),
                code: format!("{}-01", label),
            },
            task: "Development".to_string(),
            daily_hours: [0.0; 7],
            locked: false,
            locked_days: [false; 7],
        }
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

    /// Week of Mon 2026-08-17 with a general shift Mon-Fri, one named
    /// project row and generous presence.
    fn sheet() -> WeeklyTimesheet {
        let mut ts =
            WeeklyTimesheet::for_week(NaiveDate::from_ymd_opt(2026, 8, 17).unwrap(), &[]);
        ts.entries[0] = project_row("Atlas");
        for day in 0..5 {
            ts.daily_shifts[day] = Some(ShiftType::General);
        }
        ts.on_premises =
            crate::engine::grid::OnPremises::from_daily([11.0, 11.0, 11.0, 11.0, 11.0, 0.0, 0.0]);
        ts
    }

    #[test]
    fn edit_requires_shift_task_and_project() {
        let mut ts = sheet();
        // Saturday has no shift
        assert_eq!(
            apply_edit(&mut ts, &edit(0, 5, "4:00"), 0),
            Err(NotEditableReason::ShiftMissing.into())
        );

        let mut ts = sheet();
        ts.entries[0].task.clear();
        assert_eq!(
            apply_edit(&mut ts, &edit(0, 0, "4:00"), 0),
            Err(NotEditableReason::TaskMissing.into())
        );

        let mut ts = sheet();
        ts.entries[0] = project_row("");
        ts.entries[0].task = "Development".to_string();
        assert_eq!(
            apply_edit(&mut ts, &edit(0, 0, "4:00"), 0),
            Err(NotEditableReason::ProjectMissing.into())
        );
    }

    #[test]
    fn locked_rows_and_days_reject_silently() {
        let mut ts = sheet();
        ts.entries.push(leave_row(TASK_OFFICE_HOLIDAY));
        ts.entries[1].locked = true;
        assert_eq!(
            apply_edit(&mut ts, &edit(1, 0, "4:00"), 0),
            Err(NotEditableReason::RowLocked.into())
        );

        ts.entries[0].locked_days[1] = true;
        assert_eq!(
            apply_edit(&mut ts, &edit(0, 1, "4:00"), 0),
            Err(NotEditableReason::DayLocked.into())
        );
    }

    #[test]
    fn submitted_sheet_is_frozen() {
        let mut ts = sheet();
        ts.status = TimesheetStatus::Submitted;
        assert_eq!(
            apply_edit(&mut ts, &edit(0, 0, "4:00"), 0),
            Err(NotEditableReason::NotDraft.into())
        );
    }

    // Scenario A: General Shift (break 75min), on-premises 10h. Entering
    // 9:30 of project time clamps to 10:00 - 1:15 = 8:45.
    #[test]
    fn project_hours_clamp_to_on_premises_envelope() {
        let mut ts = sheet();
        ts.on_premises.daily[0] = 10.0;

        let out = apply_edit(&mut ts, &edit(0, 0, "9:30"), 0).unwrap();
        assert_eq!(timecodec::format_hours_hhmm(out.value), "8:45");
        assert_eq!(ts.entries[0].daily_hours[0], 8.75);
    }

    #[test]
    fn on_premises_cap_accounts_for_other_project_rows() {
        let mut ts = sheet();
        ts.on_premises.daily[0] = 10.0;
        ts.entries.push(project_row("Borealis"));
        ts.entries[1].daily_hours[0] = 4.0;

        let out = apply_edit(&mut ts, &edit(0, 0, "8:00"), 0).unwrap();
        // 10 - 1.25 break - 4 other project = 4.75
        assert_eq!(out.value, 4.75);
    }

    #[test]
    fn approved_leave_day_caps_without_break_deduction() {
        let mut ts = sheet();
        ts.on_premises.daily[0] = 8.0;
        // 4h of approved leave: below full coverage, but no break accrues
        ts.entries.push(leave_row("Leave Approved (annual)"));
        ts.entries[1].daily_hours[0] = 4.0;

        let out = apply_edit(&mut ts, &edit(0, 0, "9:00"), 0).unwrap();
        assert_eq!(out.value, 8.0);
    }

    #[test]
    fn zero_presence_forces_project_hours_to_zero() {
        let mut ts = sheet();
        ts.on_premises.daily[2] = 0.0;
        let out = apply_edit(&mut ts, &edit(0, 2, "6:00"), 0).unwrap();
        assert_eq!(out.value, 0.0);
    }

    #[test]
    fn partial_leave_lifts_zero_presence_rule() {
        let mut ts = sheet();
        ts.on_premises.daily[2] = 0.0;
        ts.entries.push(leave_row(TASK_HALF_DAY_LEAVE));
        ts.entries[1].daily_hours[2] = 4.75;

        let out = apply_edit(&mut ts, &edit(0, 2, "4:00"), 0).unwrap();
        assert_eq!(out.value, 4.0);
    }

    #[test]
    fn full_day_leave_snaps_to_nine_and_a_half() {
        let mut ts = sheet();
        ts.entries.push(leave_row(TASK_FULL_DAY_LEAVE));
        let out = apply_edit(&mut ts, &edit(1, 0, "2:00"), 0).unwrap();
        assert_eq!(out.value, 9.5);

        let out = apply_edit(&mut ts, &edit(1, 0, "0"), 0).unwrap();
        assert_eq!(out.value, 0.0);
    }

    #[test]
    fn half_day_leave_snaps_to_four_forty_five() {
        let mut ts = sheet();
        ts.entries.push(leave_row(TASK_HALF_DAY_LEAVE));
        let out = apply_edit(&mut ts, &edit(1, 3, "1:00"), 0).unwrap();
        assert_eq!(out.value, 4.75);
    }

    // Scenario C: office holiday on Monday shuts out project edits there.
    #[test]
    fn covered_day_rejects_other_rows() {
        let mut ts = sheet();
        let mut holiday = leave_row(TASK_OFFICE_HOLIDAY);
        holiday.daily_hours[0] = 9.5;
        ts.entries.push(holiday);

        assert_eq!(
            apply_edit(&mut ts, &edit(0, 0, "2:00"), 0),
            Err(NotEditableReason::DayCovered.into())
        );
        // other days are unaffected
        assert!(apply_edit(&mut ts, &edit(0, 1, "2:00"), 0).is_ok());
    }

    #[test]
    fn covering_entry_zeroes_out_other_rows() {
        let mut ts = sheet();
        ts.entries[0].daily_hours[0] = 4.0;
        ts.entries.push(leave_row(TASK_FULL_DAY_LEAVE));

        apply_edit(&mut ts, &edit(1, 0, "9:30"), 0).unwrap();
        assert_eq!(ts.entries[0].daily_hours[0], 0.0);
        assert_eq!(ts.entries[1].daily_hours[0], 9.5);
    }

    // Scenario B: 2h permission accepted, a second 2h the same month rejected.
    #[test]
    fn monthly_permission_quota_is_enforced() {
        let mut ts = sheet();
        ts.entries.push(leave_row(TASK_PERMISSION));

        let out = apply_edit(&mut ts, &edit(1, 0, "2:00"), 0).unwrap();
        assert_eq!(out.value, 2.0);
        assert_eq!(aggregate::sheet_permission_units(&ts, 0, None), 2);

        ts.entries.push(leave_row(TASK_PERMISSION));
        assert_eq!(
            apply_edit(&mut ts, &edit(2, 1, "2:00"), 0),
            Err(EngineError::QuotaExceeded { used: 2, attempted: 2 })
        );
        // prior-state retention
        assert_eq!(ts.entries[2].daily_hours[1], 0.0);
    }

    #[test]
    fn permission_quota_counts_prior_weeks() {
        let mut ts = sheet();
        ts.entries.push(leave_row(TASK_PERMISSION));
        assert_eq!(
            apply_edit(&mut ts, &edit(1, 0, "1:00"), 3),
            Err(EngineError::QuotaExceeded { used: 3, attempted: 1 })
        );
    }

    #[test]
    fn single_permission_entry_capped_at_three_hours() {
        let mut ts = sheet();
        ts.entries.push(leave_row(TASK_PERMISSION));
        assert_eq!(
            apply_edit(&mut ts, &edit(1, 0, "3:30"), 0),
            Err(EngineError::PermissionTooLong { hours: 3.5 })
        );
    }

    #[test]
    fn one_permission_entry_per_day() {
        let mut ts = sheet();
        ts.entries.push(leave_row(TASK_PERMISSION));
        ts.entries.push(leave_row(TASK_PERMISSION));
        apply_edit(&mut ts, &edit(1, 0, "1:00"), 0).unwrap();
        assert_eq!(
            apply_edit(&mut ts, &edit(2, 0, "1:00"), 0),
            Err(NotEditableReason::PermissionTaken.into())
        );
    }

    #[test]
    fn ceiling_rejects_and_leaves_state_unchanged() {
        let mut ts = sheet();
        ts.on_premises.daily[0] = 24.0;
        ts.entries.push(leave_row(TASK_PERMISSION));
        ts.entries[1].daily_hours[0] = 3.0;
        ts.entries.push(leave_row("Casual Leave"));
        ts.entries[2].daily_hours[0] = 12.0;
        ts.entries[0].daily_hours[0] = 6.0;
        let before = ts.clone();

        // others 15 + proposed 9 + break 1.25 = 25.25 > 24
        let err = apply_edit(&mut ts, &edit(0, 0, "9:00"), 0).unwrap_err();
        assert!(matches!(err, EngineError::BoundExceeded { .. }));
        assert_eq!(ts, before);
    }

    #[test]
    fn near_ceiling_warns_but_accepts() {
        let mut ts = sheet();
        ts.on_premises.daily[0] = 24.0;
        ts.entries.push(leave_row("Casual Leave"));
        ts.entries[1].daily_hours[0] = 12.0;

        // others 12 + 9.5 + 1.25 break = 22.75: accepted with warning
        let out = apply_edit(&mut ts, &edit(0, 0, "9:30"), 0).unwrap();
        assert!(out.warning.is_some());
        assert!(out.value > 0.0);
    }

    #[test]
    fn totals_refresh_after_accepted_edit() {
        let mut ts = sheet();
        apply_edit(&mut ts, &edit(0, 0, "8:00"), 0).unwrap();
        assert_eq!(ts.total_hours, 9.25); // 8h work + 75min break
    }
}
