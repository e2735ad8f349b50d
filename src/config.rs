// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Static configuration for one sync run: where to look in the remote store,
/// how to map filenames and sheet names to output categories, and how deep to
/// scan for header rows. The defaults mirror the production workbooks this
/// tool was built for; a YAML file can override any field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote folder to list recursively ("" = store root).
    pub dropbox_folder: String,
    /// Directory the JSON artifacts are written to.
    pub output_dir: PathBuf,
    /// Ordered keyword → category table matched against lowercased
    /// filenames; first hit wins.
    pub file_categories: Vec<(String, String)>,
    /// Ordered sheet-name pattern → raw-category table; first hit wins.
    pub rawdata_sheets: Vec<(String, String)>,
    /// Sheets whose trimmed name starts with this and match no raw pattern
    /// are auxiliary/reference sheets and are skipped.
    pub skip_prefix: String,
    /// How many leading rows to scan for a header on standard sheets.
    pub standard_scan_depth: usize,
    /// How many leading rows to scan for a header on raw-data sheets.
    /// Raw-data exports keep their header near the top.
    pub rawdata_scan_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dropbox_folder: String::new(),
            output_dir: PathBuf::from("data"),
            file_categories: vec![
                ("mål".into(), "mal".into()),
                ("mal".into(), "mal".into()),
                ("produktionsr".into(), "utfall".into()),
                ("uträkning".into(), "utfall".into()),
                ("utfall".into(), "utfall".into()),
            ],
            rawdata_sheets: vec![
                ("0.1 data försäljning".into(), "rawdata_orders".into()),
                ("0.0 data timmar".into(), "rawdata_timmar".into()),
            ],
            skip_prefix: "0".into(),
            standard_scan_depth: 60,
            rawdata_scan_depth: 20,
        }
    }
}

impl Config {
    /// Load a config from a YAML file, falling back to defaults for any
    /// field the file omits.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        serde_yaml::from_reader(file)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// Classify a source *file* by its name: first configured keyword found
    /// in the lowercased filename decides the category.
    pub fn detect_file_category(&self, filename: &str) -> Option<&str> {
        let fn_lower = filename.to_lowercase();
        self.file_categories
            .iter()
            .find(|(keyword, _)| fn_lower.contains(keyword.as_str()))
            .map(|(_, category)| category.as_str())
    }

    /// The distinct dated-output categories, in declared order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for (_, category) in &self.file_categories {
            if !out.contains(&category.as_str()) {
                out.push(category);
            }
        }
        out
    }

    /// The distinct raw-data categories, in declared order.
    pub fn raw_categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for (_, category) in &self.rawdata_sheets {
            if !out.contains(&category.as_str()) {
                out.push(category);
            }
        }
        out
    }
}
