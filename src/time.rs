//! Time & shift utilities (C1).
//!
//! Wall-clock strings are parsed to fixed-point minutes and only converted
//! to decimal hours at the boundary, so quarter-hour shifts stay exact.

use crate::error::AllocationError;

/// Parses `HH:MM` or `HH.MM` (exactly one separator) into whole minutes
/// since midnight.
pub fn parse_to_minutes(raw: &str) -> Result<i64, AllocationError> {
    let has_colon = raw.contains(':');
    let has_dot = raw.contains('.');
    let sep = match (has_colon, has_dot) {
        (true, false) => ':',
        (false, true) => '.',
        _ => return Err(AllocationError::BadTime(raw.to_string())),
    };

    let mut parts = raw.splitn(2, sep);
    let (h, m) = match (parts.next(), parts.next()) {
        (Some(h), Some(m)) => (h, m),
        _ => return Err(AllocationError::BadTime(raw.to_string())),
    };
    let hours: i64 = h.parse().map_err(|_| AllocationError::BadTime(raw.to_string()))?;
    let minutes: i64 = m.parse().map_err(|_| AllocationError::BadTime(raw.to_string()))?;
    // Hour 24 is accepted (meaning midnight at the end of the shift's day);
    // anything else must be a normal wall-clock hour.
    let valid = match hours {
        0..=23 => (0..60).contains(&minutes),
        24 => minutes == 0,
        _ => false,
    };
    if !valid {
        return Err(AllocationError::BadTime(raw.to_string()));
    }
    Ok(hours * 60 + minutes)
}

/// Parses a wall-clock string to decimal hours.
pub fn parse_hhmm(raw: &str) -> Result<f64, AllocationError> {
    Ok(minutes_to_hours(parse_to_minutes(raw)?))
}

pub fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

/// Effective (paid) length of a shift: the raw length minus a 0.5h unpaid
/// break when the raw length is 8h or more.
pub fn effective_length_minutes(start_minutes: i64, end_minutes: i64) -> i64 {
    let raw = end_minutes - start_minutes;
    if raw >= 8 * 60 {
        raw - 30
    } else {
        raw
    }
}

pub fn effective_length_hours(start_minutes: i64, end_minutes: i64) -> f64 {
    minutes_to_hours(effective_length_minutes(start_minutes, end_minutes))
}

/// Effective length of a shift given its raw `HH:MM`/`HH.MM` strings.
pub fn effective_length(start_time: &str, end_time: &str) -> Result<f64, AllocationError> {
    let start = parse_to_minutes(start_time)?;
    let end = parse_to_minutes(end_time)?;
    if end <= start {
        return Err(AllocationError::BadTime(format!(
            "end {end_time} is not after start {start_time}"
        )));
    }
    Ok(effective_length_hours(start, end))
}

/// Overnight rest in hours between one day's shift end and the next day's
/// shift start.
pub fn rest_between(a_end_hours: f64, b_start_hours: f64) -> f64 {
    (24.0 - a_end_hours) + b_start_hours
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colon_and_dot_formats() {
        assert_eq!(parse_to_minutes("09:30").unwrap(), 9 * 60 + 30);
        assert_eq!(parse_to_minutes("09.30").unwrap(), 9 * 60 + 30);
    }

    #[test]
    fn rejects_both_separators_and_garbage() {
        assert!(parse_to_minutes("09:30.5").is_err());
        assert!(parse_to_minutes("nope").is_err());
        assert!(parse_to_minutes("25:00").is_err());
        assert!(parse_to_minutes("10:61").is_err());
    }

    #[test]
    fn effective_length_subtracts_break_at_eight_hours() {
        assert!((effective_length("09:00", "17:00").unwrap() - 7.5).abs() < 1e-9);
        assert!((effective_length("09:00", "16:30").unwrap() - 7.5).abs() < 1e-9);
        assert!((effective_length("20:00", "24:00").unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn rest_between_wraps_overnight() {
        // ends at 24:00 (4h raw shift but we pass raw hours directly here)
        assert!((rest_between(24.0, 5.0) - 5.0).abs() < 1e-9);
        assert!((rest_between(20.0, 9.0) - 13.0).abs() < 1e-9);
    }
}
