//! Conversions between hour-fractions, `H:MM` strings and the free-form
//! duration values the attendance device reports.
//!
//! The codec is deliberately infallible: malformed input parses to 0.0 and
//! every rejection a user can see is raised by the rule layer above, never
//! here.

use serde_json::Value;

/// Scale a bare number to hours by magnitude.
///
/// Device exports are inconsistent about units, so anything above 100 000 is
/// taken as milliseconds, above 1 000 as seconds, above 24 as minutes, and
/// the rest as decimal hours already.
pub fn hours_from_number(n: f64) -> f64 {
    if !n.is_finite() || n <= 0.0 {
        return 0.0;
    }
    if n > 100_000.0 {
        n / 3_600_000.0
    } else if n > 1_000.0 {
        n / 3_600.0
    } else if n > 24.0 {
        n / 60.0
    } else {
        n
    }
}

/// Parse a polymorphic duration value (number or string) into hours.
///
/// Strings accept `H`, `H:MM`, `H:MM:SS` or a bare decimal.
pub fn parse_duration(value: &Value) -> f64 {
    match value {
        Value::Number(n) => hours_from_number(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => parse_duration_str(s),
        _ => 0.0,
    }
}

/// String half of [`parse_duration`]; exposed for callers that already hold
/// text.
pub fn parse_duration_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    if s.contains(':') {
        let mut parts = s.splitn(3, ':');
        let h: f64 = parts.next().and_then(|p| p.trim().parse().ok()).unwrap_or(0.0);
        let m: f64 = parts.next().and_then(|p| p.trim().parse().ok()).unwrap_or(0.0);
        let sec: f64 = parts.next().and_then(|p| p.trim().parse().ok()).unwrap_or(0.0);
        let total = h + m / 60.0 + sec / 3_600.0;
        if total.is_finite() && total > 0.0 { total } else { 0.0 }
    } else {
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => 0.0,
        }
    }
}

/// Format hours as `H:MM`, rounded to the nearest minute.
pub fn format_hours_hhmm(hours: f64) -> String {
    let total_minutes = (hours.max(0.0) * 60.0).round() as u64;
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Parse what the user typed into an hours cell.
///
/// `H:MM` input has its minutes rounded to the nearest 5-minute step, with
/// `mm >= 60` carrying into the hour. Input without a colon is taken as
/// decimal hours and snapped to the same 5-minute grid. Garbage parses to 0.
pub fn parse_hhmm_input(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }

    let total_minutes = if let Some((h, m)) = raw.split_once(':') {
        let hours: i64 = h.trim().parse().unwrap_or(0);
        let minutes: i64 = m.trim().parse().unwrap_or(0);
        if hours < 0 || minutes < 0 {
            return 0.0;
        }
        hours * 60 + minutes
    } else {
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => (v * 60.0).round() as i64,
            _ => return 0.0,
        }
    };

    // Snap to the 5-minute grid the UI exposes.
    let snapped = ((total_minutes as f64) / 5.0).round() as i64 * 5;
    (snapped.max(0) as f64) / 60.0
}

/// Whole-minute view of an hour-fraction, for comparisons that must not be
/// disturbed by float drift.
pub fn to_minutes(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_heuristic_scales_by_magnitude() {
        assert_eq!(hours_from_number(9.5), 9.5); // already hours
        assert_eq!(hours_from_number(570.0), 9.5); // minutes
        assert_eq!(hours_from_number(34_200.0), 9.5); // seconds
        assert_eq!(hours_from_number(34_200_000.0), 9.5); // milliseconds
        assert_eq!(hours_from_number(-5.0), 0.0);
        assert_eq!(hours_from_number(f64::NAN), 0.0);
    }

    #[test]
    fn duration_strings_parse_to_hours() {
        assert_eq!(parse_duration(&json!("8")), 8.0);
        assert_eq!(parse_duration(&json!("8:30")), 8.5);
        assert_eq!(parse_duration(&json!("8:30:00")), 8.5);
        assert_eq!(parse_duration(&json!("7.25")), 7.25);
        assert_eq!(parse_duration(&json!(34_200)), 9.5);
    }

    #[test]
    fn malformed_input_parses_to_zero() {
        assert_eq!(parse_duration(&json!("abc")), 0.0);
        assert_eq!(parse_duration(&json!("")), 0.0);
        assert_eq!(parse_duration(&json!(null)), 0.0);
        assert_eq!(parse_duration(&json!([1, 2])), 0.0);
        assert_eq!(parse_hhmm_input("x:y"), 0.0);
        assert_eq!(parse_hhmm_input("-3"), 0.0);
    }

    #[test]
    fn hhmm_round_trip_on_five_minute_grid() {
        for h in [0u64, 1, 8, 9, 12, 23] {
            for mm in (0u64..60).step_by(5) {
                let s = format!("{}:{:02}", h, mm);
                assert_eq!(format_hours_hhmm(parse_hhmm_input(&s)), s);
            }
        }
    }

    #[test]
    fn hhmm_input_snaps_and_carries_overflow() {
        // 1:75 carries into 2:15
        assert_eq!(format_hours_hhmm(parse_hhmm_input("1:75")), "2:15");
        // 8:32 snaps down to 8:30, 8:33 snaps up to 8:35
        assert_eq!(format_hours_hhmm(parse_hhmm_input("8:32")), "8:30");
        assert_eq!(format_hours_hhmm(parse_hhmm_input("8:33")), "8:35");
        // decimal entry lands on the same grid
        assert_eq!(parse_hhmm_input("9.5"), 9.5);
        assert_eq!(format_hours_hhmm(parse_hhmm_input("8.76")), "8:45");
    }

    #[test]
    fn format_rounds_to_nearest_minute() {
        assert_eq!(format_hours_hhmm(8.7501), "8:45");
        assert_eq!(format_hours_hhmm(0.0), "0:00");
        assert_eq!(format_hours_hhmm(10.0), "10:00");
    }
}
