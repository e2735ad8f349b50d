// src/normalize/date.rs

use crate::normalize::cell::CellValue;
use chrono::{Duration, NaiveDate};

/// Spreadsheet day-zero. Day 1 of the classic serial scheme is 1899-12-31,
/// so this epoch already absorbs the historical 1900 leap-day offset.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Convert a heterogeneous date-like cell to canonical `YYYY-MM-DD`, or
/// `None` when the value is not a date.
///
/// The cascade is deliberate: only *typed* numbers are treated as serials
/// (numeric-looking text never is), dash-delimited strings are taken on
/// faith as ISO-prefixed, and slash-delimited strings are disambiguated by
/// segment length alone. Ambiguous slash forms (2-digit years, wrong part
/// counts) are rejected rather than guessed.
pub fn normalize_date(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Date(dt) => Some(dt.format("%Y-%m-%d").to_string()),
        CellValue::Int(n) => serial_to_date(*n as f64),
        CellValue::Float(f) => serial_to_date(*f),
        CellValue::Text(s) => parse_date_str(s),
        CellValue::Empty => None,
    }
}

/// Day-count serial (whole or fractional days) from the classic epoch.
fn serial_to_date(days: f64) -> Option<String> {
    if !days.is_finite() {
        return None;
    }
    let seconds = days * 86_400.0;
    if seconds.abs() >= i64::MAX as f64 {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    let base = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;
    // try_seconds: chrono's Duration caps at i64::MAX milliseconds, well
    // below i64::MAX seconds
    let dt = base.checked_add_signed(Duration::try_seconds(seconds as i64)?)?;
    Some(dt.format("%Y-%m-%d").to_string())
}

fn parse_date_str(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.contains('-') {
        // already ISO or ISO-prefixed ("2024-01-15T00:00:00"); take the
        // date part verbatim, no range validation
        return Some(s.chars().take(10).collect());
    }
    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 3 {
            return None;
        }
        if parts[0].len() == 4 {
            // YYYY/MM/DD
            return Some(format!("{}-{:0>2}-{:0>2}", parts[0], parts[1], parts[2]));
        }
        if parts[2].len() == 4 {
            // DD/MM/YYYY
            return Some(format!("{}-{:0>2}-{:0>2}", parts[2], parts[1], parts[0]));
        }
        // 2-digit years and other ambiguous forms are not worth guessing
        return None;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    #[test]
    fn canonical_input_is_idempotent() {
        for d in ["2024-01-15", "1999-12-31", "2020-02-29"] {
            assert_eq!(normalize_date(&text(d)).as_deref(), Some(d));
        }
    }

    #[test]
    fn native_dates_drop_time_of_day() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(13, 45, 10)
            .unwrap();
        assert_eq!(
            normalize_date(&CellValue::Date(dt)).as_deref(),
            Some("2024-03-07")
        );
    }

    #[test]
    fn serial_epoch_arithmetic() {
        assert_eq!(normalize_date(&CellValue::Int(2)).as_deref(), Some("1900-01-01"));
        // 1899-12-30 + 60 days; the fictitious Excel leap day does not
        // exist in this arithmetic
        assert_eq!(normalize_date(&CellValue::Int(60)).as_deref(), Some("1900-02-28"));
        assert_eq!(normalize_date(&CellValue::Int(61)).as_deref(), Some("1900-03-01"));
        // fractional days keep the same date
        assert_eq!(
            normalize_date(&CellValue::Float(45_000.75)).as_deref(),
            Some("2023-03-15")
        );
    }

    #[test]
    fn serial_overflow_is_not_a_date() {
        assert_eq!(normalize_date(&CellValue::Float(f64::MAX)), None);
        assert_eq!(normalize_date(&CellValue::Float(f64::NAN)), None);
        // mid-range: past chrono's Duration bound in seconds but far below
        // i64::MAX seconds
        assert_eq!(normalize_date(&CellValue::Float(1.0e12)), None);
        assert_eq!(normalize_date(&CellValue::Float(5.0e13)), None);
        assert_eq!(normalize_date(&CellValue::Float(-1.0e12)), None);
        // past the datetime range but within Duration's
        assert_eq!(normalize_date(&CellValue::Int(100_000_000)), None);
    }

    #[test]
    fn dash_strings_pass_through_first_ten_chars() {
        assert_eq!(
            normalize_date(&text("2024-01-15T00:00:00")).as_deref(),
            Some("2024-01-15")
        );
        assert_eq!(normalize_date(&text(" 2024-01-15 ")).as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn slash_strings_disambiguate_by_segment_length() {
        assert_eq!(normalize_date(&text("2024/01/15")).as_deref(), Some("2024-01-15"));
        assert_eq!(normalize_date(&text("15/01/2024")).as_deref(), Some("2024-01-15"));
        assert_eq!(normalize_date(&text("2024/1/5")).as_deref(), Some("2024-01-05"));
        assert_eq!(normalize_date(&text("5/1/2024")).as_deref(), Some("2024-01-05"));
    }

    #[test]
    fn ambiguous_slash_forms_are_rejected() {
        assert_eq!(normalize_date(&text("01/02/03")), None);
        assert_eq!(normalize_date(&text("15/01")), None);
        assert_eq!(normalize_date(&text("1/2/3/4")), None);
    }

    #[test]
    fn numeric_looking_text_is_not_a_serial() {
        assert_eq!(normalize_date(&text("45000")), None);
    }

    #[test]
    fn empty_and_plain_text_are_not_dates() {
        assert_eq!(normalize_date(&CellValue::Empty), None);
        assert_eq!(normalize_date(&text("")), None);
        assert_eq!(normalize_date(&text("   ")), None);
        assert_eq!(normalize_date(&text("hello")), None);
    }
}
