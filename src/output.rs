// src/output.rs

use crate::merge::Aggregate;
use anyhow::{Context, Result};
use chrono::Local;
use serde_json::json;
use std::fs::{self, File};
use std::path::Path;
use tracing::info;

/// Write one pretty-printed JSON document per non-empty category and raw
/// category. Empty slots produce no file, so stale artifacts from earlier
/// runs are never overwritten with nothing.
pub fn write_outputs(aggregate: &Aggregate, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;

    for (category, sheets) in &aggregate.categories {
        if sheets.is_empty() {
            continue;
        }
        let path = out_dir.join(format!("{}.json", category));
        write_json(&path, sheets)?;
        info!(path = %path.display(), sheets = sheets.len(), "wrote category");
    }

    for (raw_category, rows) in &aggregate.rawdata {
        if rows.is_empty() {
            continue;
        }
        let path = out_dir.join(format!("{}.json", raw_category));
        write_json(&path, rows)?;
        info!(path = %path.display(), rows = rows.len(), "wrote raw category");
    }

    Ok(())
}

/// Record when this run finished, for the downstream consumers' freshness
/// display.
pub fn write_last_synced(out_dir: &Path) -> Result<String> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;
    let ts = Local::now().format("%Y-%m-%d %H:%M").to_string();
    write_json(&out_dir.join("last_synced.json"), &json!({ "last_synced": ts }))?;
    Ok(ts)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)
        .with_context(|| format!("writing {}", path.display()))
}
