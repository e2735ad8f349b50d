// src/normalize/mod.rs
//
// The normalization engine: pure transformations from raw workbook cells to
// date-keyed and flat-list JSON-ready records. No I/O happens below
// `workbook::normalize_workbook`, which is the byte-ingestion boundary.

pub mod cell;
pub mod classify;
pub mod date;
pub mod header;
pub mod row;
pub mod sheet;
pub mod workbook;

pub use cell::CellValue;
pub use classify::SheetKind;
pub use row::{CleanedRow, Field};
pub use workbook::{normalize_workbook, WorkbookData};

/// Date-keyed result of one standard sheet: canonical `YYYY-MM-DD` → row.
pub type DatedRows = std::collections::BTreeMap<String, CleanedRow>;
