// src/normalize/sheet.rs

use crate::config::Config;
use crate::normalize::cell::CellValue;
use crate::normalize::date::normalize_date;
use crate::normalize::header::{is_date_label, locate_header, norm_label, HeaderRule};
use crate::normalize::row::{clean_row, CleanedRow, Field};
use crate::normalize::DatedRows;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Zip header labels with one data row's cells. The shorter side truncates;
/// a duplicated label keeps the last cell, like a dict built from pairs.
fn row_map(labels: &[String], cells: &[CellValue]) -> BTreeMap<String, CellValue> {
    labels
        .iter()
        .zip(cells.iter())
        .map(|(l, c)| (l.clone(), c.clone()))
        .collect()
}

/// The date cell counts as missing when empty, blank, or numeric zero
/// (serial zero predates any plausible data).
fn date_cell_missing(value: Option<&CellValue>) -> bool {
    match value {
        None | Some(CellValue::Empty) => true,
        Some(CellValue::Text(s)) => s.trim().is_empty(),
        Some(CellValue::Int(0)) => true,
        Some(CellValue::Float(f)) if *f == 0.0 => true,
        _ => false,
    }
}

/// Parse a standard dated sheet into `{date -> cleaned row}`. Rows without a
/// usable date and rows that clean to nothing are skipped; a later row with
/// the same date overwrites the earlier one.
pub fn parse_standard(sheet_name: &str, rows: &[Vec<CellValue>], config: &Config) -> DatedRows {
    let Some(header) = locate_header(rows, config.standard_scan_depth, HeaderRule::Standard)
    else {
        warn!(sheet = %sheet_name, "no header row with a date column found; skipping sheet");
        return DatedRows::new();
    };

    let Some(date_col) = header
        .labels
        .iter()
        .find(|l| is_date_label(&norm_label(&CellValue::Text((*l).clone()))))
        .cloned()
    else {
        warn!(sheet = %sheet_name, "header row found but no date column label; skipping sheet");
        return DatedRows::new();
    };

    let mut parsed = DatedRows::new();
    for cells in &rows[header.row_idx + 1..] {
        let record = row_map(&header.labels, cells);
        if date_cell_missing(record.get(&date_col)) {
            continue;
        }
        let Some(date_key) = normalize_date(&record[&date_col]) else {
            debug!(sheet = %sheet_name, "unparseable date cell; skipping row");
            continue;
        };
        let clean = clean_row(&record);
        if clean.is_empty() {
            continue;
        }
        parsed.insert(date_key, clean);
    }
    parsed
}

/// Parse a raw-data sheet into a flat list of cleaned rows, preserving
/// source order. Entirely blank rows are dropped before cleaning; a
/// surviving `Datum`/`datum` field is re-normalized to the canonical form
/// and stored under `Datum`.
pub fn parse_rawdata(sheet_name: &str, rows: &[Vec<CellValue>], config: &Config) -> Vec<CleanedRow> {
    let Some(header) = locate_header(rows, config.rawdata_scan_depth, HeaderRule::RawData) else {
        warn!(sheet = %sheet_name, "no header row found in raw-data sheet; skipping sheet");
        return Vec::new();
    };

    let mut parsed = Vec::new();
    for cells in &rows[header.row_idx + 1..] {
        if cells.iter().all(CellValue::is_blank) {
            continue;
        }
        let mut clean = clean_row(&row_map(&header.labels, cells));
        if clean.is_empty() {
            continue;
        }
        renormalize_datum(&mut clean);
        parsed.push(clean);
    }
    parsed
}

/// Re-run the date cascade over a cleaned `Datum`/`datum` value so raw rows
/// carry the canonical form even when the export stored text or a serial.
/// Already-canonical values pass through unchanged.
fn renormalize_datum(clean: &mut CleanedRow) {
    let value = clean.get("Datum").or_else(|| clean.get("datum")).cloned();
    let Some(field) = value else { return };
    let cell = match field {
        Field::Text(s) => CellValue::Text(s),
        Field::Int(n) => CellValue::Int(n),
        Field::Float(f) => CellValue::Float(f),
    };
    if let Some(date) = normalize_date(&cell) {
        clean.insert("Datum".to_string(), Field::Text(date));
    }
}
