//! Merges device attendance records into the weekly on-premises envelope.
//!
//! Records arrive from the access-control export with inconsistent field
//! names and units; serde aliases absorb the spellings and the codec absorbs
//! the units. The envelope is advisory input to the enforcer and is never
//! mutated by the user.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::grid::{DAYS_PER_WEEK, OnPremises};
use super::timecodec;

/// One clock-in/clock-out pair. Values may be epoch numbers or `H:MM[:SS]`
/// time-of-day strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PunchPair {
    #[serde(
        default,
        alias = "in",
        alias = "inTime",
        alias = "in_time",
        alias = "checkIn",
        alias = "check_in",
        alias = "start"
    )]
    pub clock_in: Option<Value>,
    #[serde(
        default,
        alias = "out",
        alias = "outTime",
        alias = "out_time",
        alias = "checkOut",
        alias = "check_out",
        alias = "end"
    )]
    pub clock_out: Option<Value>,
}

/// One calendar day of attendance as reported by the device export.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    /// Explicit duration, preferred when present; unit is auto-detected.
    #[serde(default, alias = "totalDuration", alias = "total_duration")]
    pub duration: Option<Value>,
    #[serde(default, alias = "intervals", alias = "punches")]
    pub sessions: Vec<PunchPair>,
}

/// Raw timestamp-ish value to seconds: `H:MM[:SS]` strings become seconds of
/// day, epoch-millisecond numbers are scaled down, everything else is already
/// seconds (seconds of day or epoch seconds).
fn punch_seconds(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite())?,
        Value::String(s) if s.contains(':') => {
            let mut parts = s.trim().splitn(3, ':');
            let h: f64 = parts.next()?.parse().ok()?;
            let m: f64 = parts.next()?.parse().ok()?;
            let sec: f64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0.0);
            return Some(h * 3_600.0 + m * 60.0 + sec);
        }
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    // Epoch milliseconds sit far above any seconds-based representation.
    Some(if raw > 100_000_000_000.0 { raw / 1_000.0 } else { raw })
}

/// Hours present for one record: explicit duration wins (unit auto-detected),
/// else the summed span of its punch pairs. Punches normalize to seconds, so
/// a span is always seconds and never goes through the unit heuristic.
pub fn record_hours(record: &AttendanceRecord) -> f64 {
    if let Some(d) = &record.duration {
        let hours = timecodec::parse_duration(d);
        if hours > 0.0 {
            return hours;
        }
    }
    record
        .sessions
        .iter()
        .filter_map(|p| {
            let start = punch_seconds(p.clock_in.as_ref()?)?;
            let end = punch_seconds(p.clock_out.as_ref()?)?;
            let span = end - start;
            (span > 0.0).then_some(span / 3_600.0)
        })
        .sum()
}

/// Fold a batch of attendance records into a per-day envelope for the week
/// starting at `week_start`. Records outside the week are dropped.
pub fn compute_envelope(records: &[AttendanceRecord], week_start: NaiveDate) -> OnPremises {
    let mut daily = [0.0; DAYS_PER_WEEK];
    for record in records {
        let offset = (record.date - week_start).num_days();
        if (0..DAYS_PER_WEEK as i64).contains(&offset) {
            daily[offset as usize] += record_hours(record);
        }
    }
    OnPremises::from_daily(daily)
}

/// First-available-wins merge: a fresh envelope with any nonzero day
/// replaces the persisted snapshot, otherwise the snapshot stands, otherwise
/// all-zero.
pub fn reconcile(fresh: OnPremises, persisted: Option<&OnPremises>) -> OnPremises {
    if !fresh.is_empty() {
        return fresh;
    }
    persisted.cloned().unwrap_or_default()
}
