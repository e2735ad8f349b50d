// src/normalize/row.rs

use crate::normalize::cell::CellValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// A cleaned scalar: exactly one of a number or a non-empty trimmed string
/// (canonical date strings are plain `Text`). Serializes untagged so numbers
/// stay JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Int(i64),
    Float(f64),
    Text(String),
}

/// One cleaned data row: non-blank column label → `Field`. An empty map
/// means "no data" and must be excluded from results by the caller.
pub type CleanedRow = BTreeMap<String, Field>;

/// Drop blank labels and blank values, coerce the rest: native dates become
/// canonical `YYYY-MM-DD` text, numbers pass through untouched, text is
/// trimmed.
pub fn clean_row(row: &BTreeMap<String, CellValue>) -> CleanedRow {
    let mut clean = CleanedRow::new();
    for (label, value) in row {
        if label.trim().is_empty() {
            continue;
        }
        let field = match value {
            CellValue::Date(dt) => Field::Text(dt.format("%Y-%m-%d").to_string()),
            CellValue::Int(n) => Field::Int(*n),
            CellValue::Float(f) => Field::Float(*f),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    continue;
                }
                Field::Text(trimmed.to_string())
            }
            CellValue::Empty => continue,
        };
        clean.insert(label.clone(), field);
    }
    clean
}
