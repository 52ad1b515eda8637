//! Best-effort coercion of raw cell values into typed values.
//!
//! Intake files mix ISO dates, regional date formats, spreadsheet serial
//! numbers, and numbers with thousands separators, sometimes in the same
//! column. Coercion here is deliberately lenient: a failed numeric parse
//! degrades to a fallback instead of erroring, and the temporal coercer
//! distinguishes an empty cell from an unparseable one so the caller can
//! decide whether absence matters.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::constants::SERIAL_DATE_MIN;

/// String date formats tried in priority order before the ISO fallback.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Outcome of coercing a raw value into a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOutcome {
    Parsed(NaiveDate),
    /// The cell was empty, null, or the column absent. Not an error by
    /// itself; required-ness is the caller's call.
    Absent,
    /// A value was present but no supported format matched.
    Unparseable,
}

impl DateOutcome {
    pub fn parsed(self) -> Option<NaiveDate> {
        match self {
            DateOutcome::Parsed(d) => Some(d),
            _ => None,
        }
    }
}

/// Convert a raw cell value into a calendar date.
///
/// Numeric cells are spreadsheet serial dates: days since the legacy
/// 1899-12-30 epoch anchor. Numeric-looking strings are only treated as
/// serials above a plausibility floor, otherwise the ordered format list and
/// finally a generic ISO-8601 parse are tried.
pub fn coerce_date(value: Option<&Value>) -> DateOutcome {
    let value = match value {
        None | Some(Value::Null) => return DateOutcome::Absent,
        Some(v) => v,
    };

    if let Value::Number(n) = value {
        return match n.as_f64() {
            Some(serial) => DateOutcome::Parsed(serial_to_date(serial)),
            None => DateOutcome::Unparseable,
        };
    }

    let text = match value.as_str() {
        Some(s) => s.trim(),
        None => return DateOutcome::Unparseable,
    };
    if text.is_empty() {
        return DateOutcome::Absent;
    }

    // A bare number above the floor is a serial date that survived a
    // round-trip through a text format.
    if let Ok(serial) = text.parse::<f64>() {
        if serial > SERIAL_DATE_MIN {
            return DateOutcome::Parsed(serial_to_date(serial));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return DateOutcome::Parsed(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return DateOutcome::Parsed(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return DateOutcome::Parsed(dt.date());
    }

    DateOutcome::Unparseable
}

/// Days-since-epoch to calendar date, using the spreadsheet anchor of
/// 1899-12-30. The anchor bakes in the format's historical off-by-one leap
/// year; existing exports depend on it, so it must not be corrected.
fn serial_to_date(serial: f64) -> NaiveDate {
    let anchor = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let millis = (serial * 86_400_000.0) as i64;
    (anchor + Duration::milliseconds(millis)).date()
}

/// Convert a raw cell into a number, stripping thousands-separator commas.
///
/// Never errors: empty, absent, or unparseable input yields `fallback`, or 0
/// when no fallback is given. Only the salary range check downstream turns a
/// degraded value into a hard failure.
pub fn coerce_number(value: Option<&Value>, fallback: Option<f64>) -> f64 {
    let default = fallback.unwrap_or(0.0);

    let value = match value {
        None | Some(Value::Null) => return default,
        Some(v) => v,
    };

    match value {
        Value::Number(n) => n.as_f64().unwrap_or(default),
        Value::String(s) => {
            let cleaned = s.trim().replace(',', "");
            if cleaned.is_empty() {
                return default;
            }
            cleaned.parse::<f64>().unwrap_or(default)
        }
        _ => default,
    }
}

/// Trimmed text content of a cell, or `None` when the cell is absent/null.
/// An empty string is returned as `Some("")` so callers can distinguish a
/// present-but-blank cell from a missing column.
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    }
}

/// Lenient yes/no coercion for the completed-training field. Accepts the
/// affirmative spellings seen in real files; everything else is `false`.
pub fn coerce_flag(value: Option<&Value>) -> bool {
    if let Some(Value::Bool(b)) = value {
        return *b;
    }
    match coerce_text(value) {
        Some(text) => matches!(text.to_lowercase().as_str(), "true" | "sí" | "si" | "1"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_serial_date_epoch_anchor() {
        // The historical anchor: serial 1 is 1899-12-31, serial 2 is
        // 1900-01-01. Exported data depends on this exact quirk.
        assert_eq!(coerce_date(Some(&json!(1))), DateOutcome::Parsed(date(1899, 12, 31)));
        assert_eq!(coerce_date(Some(&json!(2))), DateOutcome::Parsed(date(1900, 1, 1)));
    }

    #[test]
    fn test_serial_date_modern_value() {
        assert_eq!(
            coerce_date(Some(&json!(45292))),
            DateOutcome::Parsed(date(2024, 1, 1))
        );
    }

    #[test]
    fn test_numeric_string_above_floor_is_serial() {
        assert_eq!(
            coerce_date(Some(&json!("45292"))),
            DateOutcome::Parsed(date(2024, 1, 1))
        );
        // Below the floor a numeric string is not a plausible serial.
        assert_eq!(coerce_date(Some(&json!("999"))), DateOutcome::Unparseable);
    }

    #[test]
    fn test_string_date_formats_in_order() {
        assert_eq!(
            coerce_date(Some(&json!("2023-04-05"))),
            DateOutcome::Parsed(date(2023, 4, 5))
        );
        // Day-first wins for ambiguous slashed dates.
        assert_eq!(
            coerce_date(Some(&json!("05/04/2023"))),
            DateOutcome::Parsed(date(2023, 4, 5))
        );
        // Month-first is reached when day-first cannot parse.
        assert_eq!(
            coerce_date(Some(&json!("12/25/2023"))),
            DateOutcome::Parsed(date(2023, 12, 25))
        );
        assert_eq!(
            coerce_date(Some(&json!("05-04-2023"))),
            DateOutcome::Parsed(date(2023, 4, 5))
        );
        assert_eq!(
            coerce_date(Some(&json!("2023/04/05"))),
            DateOutcome::Parsed(date(2023, 4, 5))
        );
    }

    #[test]
    fn test_iso_datetime_fallback() {
        assert_eq!(
            coerce_date(Some(&json!("2023-04-05T13:45:00Z"))),
            DateOutcome::Parsed(date(2023, 4, 5))
        );
        assert_eq!(
            coerce_date(Some(&json!("2023-04-05T13:45:00"))),
            DateOutcome::Parsed(date(2023, 4, 5))
        );
    }

    #[test]
    fn test_empty_is_absent_not_unparseable() {
        assert_eq!(coerce_date(None), DateOutcome::Absent);
        assert_eq!(coerce_date(Some(&Value::Null)), DateOutcome::Absent);
        assert_eq!(coerce_date(Some(&json!(""))), DateOutcome::Absent);
        assert_eq!(coerce_date(Some(&json!("   "))), DateOutcome::Absent);
        assert_eq!(coerce_date(Some(&json!("not a date"))), DateOutcome::Unparseable);
    }

    #[test]
    fn test_number_strips_thousands_separators() {
        assert_eq!(coerce_number(Some(&json!("12,345")), None), 12345.0);
        assert_eq!(coerce_number(Some(&json!("1,234,567.5")), None), 1234567.5);
    }

    #[test]
    fn test_number_fallback_policy() {
        assert_eq!(coerce_number(Some(&json!("")), None), 0.0);
        assert_eq!(coerce_number(Some(&json!("abc")), Some(5.0)), 5.0);
        assert_eq!(coerce_number(None, Some(5.0)), 5.0);
        assert_eq!(coerce_number(None, None), 0.0);
        assert_eq!(coerce_number(Some(&json!(42)), None), 42.0);
    }

    #[test]
    fn test_flag_accepts_affirmative_spellings() {
        assert!(coerce_flag(Some(&json!("Sí"))));
        assert!(coerce_flag(Some(&json!("si"))));
        assert!(coerce_flag(Some(&json!("TRUE"))));
        assert!(coerce_flag(Some(&json!("1"))));
        assert!(coerce_flag(Some(&json!(true))));
        assert!(!coerce_flag(Some(&json!("No"))));
        assert!(!coerce_flag(Some(&json!(""))));
        assert!(!coerce_flag(None));
    }
}
