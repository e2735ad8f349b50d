use anyhow::Result;
use reqwest::Client;
use sheetsync::{
    config::Config,
    fetch::{DropboxAuth, DropboxClient},
    merge::Aggregate,
    normalize::normalize_workbook,
    output,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configuration & auth ─────────────────────────────────────
    let config = match std::env::var("SHEETSYNC_CONFIG") {
        Ok(path) => Config::from_path(&path)?,
        Err(_) => Config::default(),
    };
    let client = Client::new();
    let auth = DropboxAuth::from_env()?;
    let token = auth.access_token(&client).await?;
    let dropbox = DropboxClient::new(client, token);

    // ─── 3) list remote files ────────────────────────────────────────
    let entries = dropbox.list_folder(&config.dropbox_folder).await?;
    info!(entries = entries.len(), "listed remote folder recursively");

    // ─── 4) download + normalize + merge, one file at a time ─────────
    // Sequential on purpose: per-date overwrite ordering across files is
    // part of the merge semantics.
    let mut aggregate = Aggregate::for_config(&config);
    for entry in entries {
        if !entry.is_file() {
            continue;
        }
        let name = entry.name.as_str();
        if !name.ends_with(".xlsx") && !name.ends_with(".xls") {
            continue;
        }
        let Some(category) = config.detect_file_category(name).map(str::to_string) else {
            info!(file = %name, "no category keyword matches; skipping file");
            continue;
        };
        let Some(path) = entry.path_lower.as_deref() else {
            warn!(file = %name, "listing entry has no path; skipping file");
            continue;
        };

        info!(file = %name, category = %category, "downloading");
        let bytes = match dropbox.download(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(file = %name, "download failed: {:#}", e);
                continue;
            }
        };

        match normalize_workbook(&bytes, &config) {
            Ok(data) => {
                let sheets = data.sheets.len();
                let raw_rows: usize = data.rawdata.values().map(Vec::len).sum();
                info!(file = %name, sheets, raw_rows, "normalized workbook");
                aggregate.merge(&category, data);
            }
            Err(e) => {
                // corrupt container; keep the run going on the other files
                error!(file = %name, "could not open workbook: {:#}", e);
            }
        }
    }

    // ─── 5) write artifacts ──────────────────────────────────────────
    output::write_outputs(&aggregate, &config.output_dir)?;
    let ts = output::write_last_synced(&config.output_dir)?;
    info!(synced_at = %ts, "done");
    Ok(())
}
