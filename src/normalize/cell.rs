// src/normalize/cell.rs

use calamine::Data;
use chrono::NaiveDateTime;

/// A raw cell value, tagged once at the ingestion boundary so every later
/// stage can switch exhaustively instead of re-inspecting types.
///
/// `Int` and `Float` are kept apart (rather than a single Number kind)
/// because the source format distinguishes them and the JSON output must
/// render integers without a decimal point.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(n) => CellValue::Int(*n),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => {
                let text = if *b { "TRUE" } else { "FALSE" };
                CellValue::Text(text.to_string())
            }
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => CellValue::Date(naive),
                // out-of-range serial; keep the number, the date cascade
                // will reject it there
                None => CellValue::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
        }
    }
}

impl CellValue {
    /// Empty, or text that trims to nothing. Numbers and dates are never
    /// blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Stringify for use as a header label (trimmed; empty cell → "").
    pub fn label(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Date(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::ExcelDateTime;

    #[test]
    fn converts_calamine_values() {
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
        assert_eq!(
            CellValue::from(&Data::String("hi".into())),
            CellValue::Text("hi".into())
        );
        assert_eq!(CellValue::from(&Data::Int(3)), CellValue::Int(3));
        assert_eq!(CellValue::from(&Data::Float(1.5)), CellValue::Float(1.5));
        assert_eq!(
            CellValue::from(&Data::Bool(true)),
            CellValue::Text("TRUE".into())
        );
    }

    #[test]
    fn datetime_cells_become_dates() {
        let dt = ExcelDateTime::new(45_000.0, calamine::ExcelDateTimeType::DateTime, false);
        match CellValue::from(&Data::DateTime(dt)) {
            CellValue::Date(naive) => {
                assert_eq!(naive.format("%Y-%m-%d").to_string(), "2023-03-15")
            }
            other => panic!("expected Date, got {:?}", other),
        }
    }

    #[test]
    fn blankness() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".into()).is_blank());
        assert!(!CellValue::Text("x".into()).is_blank());
        assert!(!CellValue::Int(0).is_blank());
    }

    #[test]
    fn labels_are_trimmed_strings() {
        assert_eq!(CellValue::Text("  Datum ".into()).label(), "Datum");
        assert_eq!(CellValue::Empty.label(), "");
        assert_eq!(CellValue::Int(7).label(), "7");
    }
}
