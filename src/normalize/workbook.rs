// src/normalize/workbook.rs

use crate::config::Config;
use crate::normalize::cell::CellValue;
use crate::normalize::classify::{classify, SheetKind};
use crate::normalize::row::CleanedRow;
use crate::normalize::sheet::{parse_rawdata, parse_standard};
use crate::normalize::DatedRows;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto_from_rs, Reader};
use std::collections::BTreeMap;
use std::io::Cursor;
use tracing::{debug, info, warn};

/// One workbook's normalized output, handed to the merge accumulator.
#[derive(Debug, Default, PartialEq)]
pub struct WorkbookData {
    /// Standard sheets with at least one dated row.
    pub sheets: BTreeMap<String, DatedRows>,
    /// Raw-category rows, concatenated in sheet-then-row order.
    pub rawdata: BTreeMap<String, Vec<CleanedRow>>,
}

/// Open workbook bytes and normalize every sheet. Opening the container is
/// the only fatal failure here; malformed *content* always degrades to fewer
/// rows plus a diagnostic.
pub fn normalize_workbook(bytes: &[u8], config: &Config) -> Result<WorkbookData> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).context("opening workbook")?;

    let mut grids = Vec::new();
    for (name, range) in workbook.worksheets() {
        let rows: Vec<Vec<CellValue>> = range
            .rows()
            .map(|r| r.iter().map(CellValue::from).collect())
            .collect();
        grids.push((name, rows));
    }
    Ok(normalize_sheets(grids, config))
}

/// Grid-level entry point beneath the calamine wrapper: classify and parse
/// each sheet, in workbook order.
pub fn normalize_sheets(
    sheets: impl IntoIterator<Item = (String, Vec<Vec<CellValue>>)>,
    config: &Config,
) -> WorkbookData {
    let mut data = WorkbookData::default();

    for (sheet_name, rows) in sheets {
        if rows.is_empty() {
            debug!(sheet = %sheet_name, "sheet has no rows; skipping");
            continue;
        }
        match classify(&sheet_name, config) {
            SheetKind::RawData(category) => {
                let parsed = parse_rawdata(&sheet_name, &rows, config);
                if parsed.is_empty() {
                    warn!(sheet = %sheet_name, "raw-data sheet yielded no rows");
                    continue;
                }
                info!(sheet = %sheet_name, category = %category, rows = parsed.len(), "parsed raw-data sheet");
                data.rawdata.entry(category).or_default().extend(parsed);
            }
            SheetKind::Skip => {
                info!(sheet = %sheet_name, "skipping unmapped auxiliary sheet");
            }
            SheetKind::Standard => {
                let parsed = parse_standard(&sheet_name, &rows, config);
                if parsed.is_empty() {
                    warn!(sheet = %sheet_name, "sheet yielded no dated rows");
                    continue;
                }
                info!(sheet = %sheet_name, rows = parsed.len(), "parsed sheet");
                data.sheets.insert(sheet_name, parsed);
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::row::Field;

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::Text(c.to_string())).collect()
    }

    fn standard_grid(date: &str, qty: i64) -> Vec<Vec<CellValue>> {
        vec![
            text_row(&["Datum", "Qty"]),
            vec![CellValue::Text(date.into()), CellValue::Int(qty)],
        ]
    }

    #[test]
    fn dispatches_by_sheet_kind() {
        let cfg = Config::default();
        let sheets = vec![
            ("Plan".to_string(), standard_grid("2024-01-01", 1)),
            (
                "0.1 Data Försäljning".to_string(),
                vec![
                    text_row(&["Säljare", "Projekt"]),
                    text_row(&["Anna", "Bygg A"]),
                ],
            ),
            ("0.9 Referens".to_string(), standard_grid("2024-01-02", 2)),
        ];
        let data = normalize_sheets(sheets, &cfg);
        assert_eq!(data.sheets.len(), 1);
        assert!(data.sheets.contains_key("Plan"));
        assert_eq!(data.rawdata["rawdata_orders"].len(), 1);
        // the skip-prefixed sheet contributed nothing anywhere
        assert_eq!(data.rawdata.len(), 1);
    }

    #[test]
    fn headerless_sheet_does_not_abort_later_sheets() {
        let cfg = Config::default();
        let sheets = vec![
            ("Trasig".to_string(), vec![text_row(&["a", "b"]); 70]),
            ("Plan".to_string(), standard_grid("2024-01-01", 3)),
        ];
        let data = normalize_sheets(sheets, &cfg);
        assert!(!data.sheets.contains_key("Trasig"));
        assert_eq!(data.sheets["Plan"]["2024-01-01"]["Qty"], Field::Int(3));
    }

    #[test]
    fn standard_sheet_with_zero_dated_rows_is_omitted() {
        let cfg = Config::default();
        let sheets = vec![(
            "Plan".to_string(),
            vec![
                text_row(&["Datum", "Qty"]),
                vec![CellValue::Text("inte ett datum".into()), CellValue::Int(1)],
            ],
        )];
        let data = normalize_sheets(sheets, &cfg);
        assert!(data.sheets.is_empty());
    }

    #[test]
    fn two_raw_sheets_concatenate_into_one_category() {
        let mut cfg = Config::default();
        cfg.rawdata_sheets = vec![("data timmar".into(), "rawdata_timmar".into())];
        let raw_grid = vec![
            text_row(&["Datum", "Timmar"]),
            vec![CellValue::Text("2024-01-01".into()), CellValue::Float(8.0)],
        ];
        let sheets = vec![
            ("Data Timmar Jan".to_string(), raw_grid.clone()),
            ("Data Timmar Feb".to_string(), raw_grid),
        ];
        let data = normalize_sheets(sheets, &cfg);
        // identical rows are appended, never deduplicated
        assert_eq!(data.rawdata["rawdata_timmar"].len(), 2);
        assert_eq!(
            data.rawdata["rawdata_timmar"][0],
            data.rawdata["rawdata_timmar"][1]
        );
    }

    #[test]
    fn sheet_without_rows_contributes_nothing() {
        let cfg = Config::default();
        let sheets = vec![
            ("Tom".to_string(), Vec::new()),
            ("Plan".to_string(), standard_grid("2024-01-01", 1)),
        ];
        let data = normalize_sheets(sheets, &cfg);
        assert!(!data.sheets.contains_key("Tom"));
        assert_eq!(data.sheets.len(), 1);
    }

    #[test]
    fn unopenable_bytes_error_at_the_boundary() {
        assert!(normalize_workbook(b"not a workbook", &Config::default()).is_err());
    }
}
