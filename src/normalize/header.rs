// src/normalize/header.rs

use crate::normalize::cell::CellValue;

/// Column labels whose normalized form marks the date column.
pub const DATE_LABELS: [&str; 2] = ["datum", "date"];

/// Fallback marker pair for raw-data sheets whose header carries no date
/// column at all.
const RAW_FALLBACK_LABELS: (&str, &str) = ("säljare", "projekt");

/// Which header-detection rule to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderRule {
    /// A row containing a date-column label.
    Standard,
    /// A date-column label, or both raw-data marker labels.
    RawData,
}

/// A located header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub row_idx: usize,
    /// Header cells stringified and trimmed, positionally aligned with data
    /// rows; may contain empty or duplicate labels.
    pub labels: Vec<String>,
}

/// Normalized form used for label matching: trimmed, lowercased, colons
/// removed. Removing an interior colon can expose trailing whitespace, so
/// trim again afterwards.
pub fn norm_label(cell: &CellValue) -> String {
    cell.label().to_lowercase().replace(':', "").trim().to_string()
}

/// Whether this normalized label names the date column.
pub fn is_date_label(normalized: &str) -> bool {
    DATE_LABELS.contains(&normalized)
}

/// Scan the first `scan_depth` rows for a header row under the given rule.
/// `None` means the sheet has no recognizable header and must be skipped by
/// the caller (with a diagnostic, never an error).
pub fn locate_header(
    rows: &[Vec<CellValue>],
    scan_depth: usize,
    rule: HeaderRule,
) -> Option<Header> {
    let limit = scan_depth.min(rows.len());
    for (i, row) in rows[..limit].iter().enumerate() {
        let cells: Vec<String> = row.iter().map(norm_label).collect();
        let mut hit = cells.iter().any(|c| is_date_label(c));
        if !hit && rule == HeaderRule::RawData {
            let (a, b) = RAW_FALLBACK_LABELS;
            hit = cells.iter().any(|c| c == a) && cells.iter().any(|c| c == b);
        }
        if hit {
            return Some(Header {
                row_idx: i,
                labels: row.iter().map(CellValue::label).collect(),
            });
        }
    }
    None
}
