// src/merge.rs

use crate::config::Config;
use crate::normalize::{CleanedRow, DatedRows, WorkbookData};
use std::collections::BTreeMap;

/// Running totals for one sync run, built strictly sequentially across all
/// source files. Merging is the serialization point of the pipeline:
/// overwrite ordering defines correctness, so files must be applied in
/// listing order.
#[derive(Debug, Default, PartialEq)]
pub struct Aggregate {
    /// category → sheet name → date → cleaned row.
    pub categories: BTreeMap<String, BTreeMap<String, DatedRows>>,
    /// raw category → rows, files concatenated in processing order.
    pub rawdata: BTreeMap<String, Vec<CleanedRow>>,
}

impl Aggregate {
    /// Pre-seed every configured category and raw category so each output
    /// document has a slot even when no file contributes to it.
    pub fn for_config(config: &Config) -> Self {
        let mut agg = Self::default();
        for category in config.categories() {
            agg.categories.insert(category.to_string(), BTreeMap::new());
        }
        for raw in config.raw_categories() {
            agg.rawdata.insert(raw.to_string(), Vec::new());
        }
        agg
    }

    /// Fold one file's normalized output into the totals under the given
    /// file category. Dated sheets merge per date key (insert or overwrite,
    /// never delete); raw lists extend by concatenation, no deduplication.
    pub fn merge(&mut self, category: &str, data: WorkbookData) {
        let per_sheet = self.categories.entry(category.to_string()).or_default();
        for (sheet_name, dated) in data.sheets {
            per_sheet.entry(sheet_name).or_default().extend(dated);
        }
        for (raw_category, rows) in data.rawdata {
            self.rawdata.entry(raw_category).or_default().extend(rows);
        }
    }
}
