//! Weekly submit gate: shift coverage, the weekly minimum, and the
//! submit-time on-premises reconciliation checks.

use serde::Serialize;
use utoipa::ToSchema;

use super::aggregate;
use super::error::EngineError;
use super::grid::{DAY_LABELS, DAYS_PER_WEEK, WeeklyTimesheet, is_weekend};
use super::timecodec;

/// Continuously recomputed eligibility snapshot shown next to the grid.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubmitCheck {
    /// Weekday labels still missing a shift selection.
    pub missing_shift_days: Vec<String>,
    /// Σ total-with-break over non-covered days.
    pub weekly_total: f64,
    /// Σ selected-shift minimums over the same days.
    pub weekly_required: f64,
    pub eligible: bool,
}

/// Cheap eligibility check, run on every change.
pub fn submit_eligibility(sheet: &WeeklyTimesheet) -> SubmitCheck {
    let mut missing_shift_days = Vec::new();
    let mut weekly_total = 0.0;
    let mut weekly_required = 0.0;

    for day in 0..DAYS_PER_WEEK {
        if aggregate::day_fully_covered(sheet, day) {
            continue;
        }
        if !is_weekend(day) && sheet.daily_shifts[day].is_none() {
            missing_shift_days.push(DAY_LABELS[day].to_string());
        }
        weekly_total += aggregate::total_with_break(sheet, day);
        if let Some(shift) = sheet.daily_shifts[day] {
            weekly_required += shift.policy().min_hours;
        }
    }

    let eligible = missing_shift_days.is_empty()
        && timecodec::to_minutes(weekly_total) >= timecodec::to_minutes(weekly_required);
    SubmitCheck {
        missing_shift_days,
        weekly_total,
        weekly_required,
        eligible,
    }
}

/// Full submit validation. Runs the eligibility check plus the weekday
/// on-premises reconciliation, which is deliberately minute-precision to
/// dodge float drift. Returns every violation, not just the first.
pub fn validate_submit(sheet: &WeeklyTimesheet) -> Result<(), Vec<EngineError>> {
    let mut errors = Vec::new();

    let check = submit_eligibility(sheet);
    if !check.missing_shift_days.is_empty() {
        errors.push(EngineError::ShiftNotSelected {
            days: check.missing_shift_days.clone(),
        });
    }
    if timecodec::to_minutes(check.weekly_total) < timecodec::to_minutes(check.weekly_required) {
        errors.push(EngineError::InsufficientHours {
            required: timecodec::format_hours_hhmm(check.weekly_required),
            actual: timecodec::format_hours_hhmm(check.weekly_total),
        });
    }

    for day in 0..5 {
        let on_prem_min = timecodec::to_minutes(sheet.on_premises.daily[day]);
        let total_min = timecodec::to_minutes(aggregate::total_with_break(sheet, day));
        if on_prem_min > total_min {
            errors.push(EngineError::OnPremisesMismatch {
                day: DAY_LABELS[day].to_string(),
                on_premises: timecodec::format_hours_hhmm(sheet.on_premises.daily[day]),
                total: timecodec::format_hours_hhmm(aggregate::total_with_break(sheet, day)),
            });
        }
        if on_prem_min == 0 && aggregate::project_hours(sheet, day, None) > 0.0 {
            errors.push(EngineError::ProjectWithoutPresence {
                day: DAY_LABELS[day].to_string(),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Save-as-draft gate: at least one row with a project, a task or a nonzero
/// hour.
pub fn has_some_data(sheet: &WeeklyTimesheet) -> bool {
    sheet.entries.iter().any(|e| {
        !e.task.is_empty()
            || e.project_label().is_some_and(|l| !l.is_empty())
            || e.daily_hours.iter().any(|&h| h > 0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::{
        EntryKind, OnPremises, TASK_FULL_DAY_LEAVE, WeekEntry, WeeklyTimesheet,
    };
    use crate::engine::policy::ShiftType;
    use chrono::NaiveDate;

    fn sheet() -> WeeklyTimesheet {
        let mut ts =
            WeeklyTimesheet::for_week(NaiveDate::from_ymd_opt(2026, 8, 17).unwrap(), &[]);
        ts.entries[0] = WeekEntry {
            kind: EntryKind::Project {
                label: "Atlas".to_string(),
                code: "ATL-01".to_string(),
            },
            task: "Development".to_string(),
            daily_hours: [0.0; 7],
            locked: false,
            locked_days: [false; 7],
        };
        ts
    }

    /// Mon-Fri general shift, 8:15 of work a day; with the 1:15 break each
    /// day lands exactly on the 9:30 minimum.
    fn filled_week() -> WeeklyTimesheet {
        let mut ts = sheet();
        for day in 0..5 {
            ts.daily_shifts[day] = Some(ShiftType::General);
            ts.entries[0].daily_hours[day] = 8.25;
        }
        ts.on_premises = OnPremises::from_daily([9.5, 9.5, 9.5, 9.5, 9.5, 0.0, 0.0]);
        ts
    }

    // Scenario D: Monday shift left unselected.
    #[test]
    fn missing_shift_blocks_submit() {
        let mut ts = filled_week();
        ts.daily_shifts[0] = None;
        ts.entries[0].daily_hours[0] = 0.0;
        ts.on_premises.daily[0] = 0.0;

        let check = submit_eligibility(&ts);
        assert_eq!(check.missing_shift_days, vec!["Mon"]);
        assert!(!check.eligible);

        let errors = validate_submit(&ts).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            EngineError::ShiftNotSelected { days } if days == &vec!["Mon".to_string()]
        )));
    }

    #[test]
    fn covered_weekday_needs_no_shift() {
        let mut ts = filled_week();
        // Wednesday consumed by a full-day leave
        ts.daily_shifts[2] = None;
        ts.entries[0].daily_hours[2] = 0.0;
        ts.on_premises.daily[2] = 0.0;
        let mut leave = WeekEntry {
            kind: EntryKind::Leave,
            task: TASK_FULL_DAY_LEAVE.to_string(),
            daily_hours: [0.0; 7],
            locked: false,
            locked_days: [false; 7],
        };
        leave.daily_hours[2] = 9.5;
        ts.entries.push(leave);

        let check = submit_eligibility(&ts);
        assert!(check.missing_shift_days.is_empty());
        assert!(check.eligible);
        assert!(validate_submit(&ts).is_ok());
    }

    #[test]
    fn weekly_minimum_is_enforced() {
        let mut ts = filled_week();
        ts.entries[0].daily_hours[4] = 4.0; // Friday short
        ts.on_premises.daily[4] = 5.25;

        let check = submit_eligibility(&ts);
        assert!(!check.eligible);
        let errors = validate_submit(&ts).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, EngineError::InsufficientHours { .. })));
    }

    #[test]
    fn fully_reported_week_submits() {
        let ts = filled_week();
        assert!(submit_eligibility(&ts).eligible);
        assert!(validate_submit(&ts).is_ok());
    }

    #[test]
    fn on_premises_above_total_blocks_submit() {
        let mut ts = filled_week();
        ts.on_premises.daily[1] = 11.0; // present 11h, reported 9.5h

        let errors = validate_submit(&ts).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            EngineError::OnPremisesMismatch { day, .. } if day == "Tue"
        )));
    }

    #[test]
    fn project_hours_without_presence_block_submit() {
        let mut ts = filled_week();
        ts.on_premises.daily[3] = 0.0; // Thursday: hours claimed, never badged in

        let errors = validate_submit(&ts).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            EngineError::ProjectWithoutPresence { day } if day == "Thu"
        )));
    }

    #[test]
    fn minute_precision_comparison_ignores_float_drift() {
        let mut ts = filled_week();
        // 0.1 + 0.2 style drift: identical down to the minute must pass
        ts.on_premises.daily[0] = 0.1 + 0.2 + 9.2;
        ts.entries[0].daily_hours[0] = 8.25; // + 1.25 break = 9.5
        assert!(validate_submit(&ts).is_ok());
    }

    // Scenario E: nothing entered at all.
    #[test]
    fn empty_sheet_has_no_data() {
        let mut ts =
            WeeklyTimesheet::for_week(NaiveDate::from_ymd_opt(2026, 8, 17).unwrap(), &[]);
        assert!(!has_some_data(&ts));

        // shift picks alone are not data; hours are
        ts.daily_shifts[0] = Some(ShiftType::General);
        assert!(!has_some_data(&ts));
        ts.entries[0].daily_hours[0] = 1.0;
        assert!(has_some_data(&ts));
    }

    #[test]
    fn any_row_content_counts_as_data() {
        let ts = sheet();
        assert!(has_some_data(&ts)); // project + task chosen
    }
}
