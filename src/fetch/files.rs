// src/fetch/files.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const LIST_FOLDER_URL: &str = "https://api.dropboxapi.com/2/files/list_folder";
const LIST_CONTINUE_URL: &str = "https://api.dropboxapi.com/2/files/list_folder/continue";
const DOWNLOAD_URL: &str = "https://content.dropboxapi.com/2/files/download";

/// One entry from a folder listing. `tag` is `"file"` for downloadable
/// files; folders and deletions carry other tags.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(rename = ".tag")]
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub path_lower: Option<String>,
}

impl Entry {
    pub fn is_file(&self) -> bool {
        self.tag == "file"
    }
}

#[derive(Deserialize)]
struct ListFolderResponse {
    #[serde(default)]
    entries: Vec<Entry>,
    #[serde(default)]
    cursor: String,
    #[serde(default)]
    has_more: bool,
}

/// Thin client over the two Dropbox endpoints the sync uses, bound to one
/// access token for the duration of a run.
pub struct DropboxClient {
    client: Client,
    token: String,
}

impl DropboxClient {
    pub fn new(client: Client, token: String) -> Self {
        Self { client, token }
    }

    /// List `folder` recursively, following `has_more`/`cursor` pagination
    /// until the listing is complete.
    pub async fn list_folder(&self, folder: &str) -> Result<Vec<Entry>> {
        let mut resp: ListFolderResponse = self
            .client
            .post(LIST_FOLDER_URL)
            .bearer_auth(&self.token)
            .json(&json!({ "path": folder, "recursive": true }))
            .send()
            .await
            .context("POST files/list_folder")?
            .error_for_status()
            .context("list_folder failed")?
            .json()
            .await
            .context("parsing list_folder response")?;

        let mut entries = std::mem::take(&mut resp.entries);
        while resp.has_more {
            debug!(cursor = %resp.cursor, "following list_folder cursor");
            resp = self
                .client
                .post(LIST_CONTINUE_URL)
                .bearer_auth(&self.token)
                .json(&json!({ "cursor": resp.cursor }))
                .send()
                .await
                .context("POST files/list_folder/continue")?
                .error_for_status()
                .context("list_folder/continue failed")?
                .json()
                .await
                .context("parsing list_folder/continue response")?;
            entries.append(&mut resp.entries);
        }

        Ok(entries)
    }

    /// Download one file's bytes. The path goes in the `Dropbox-API-Arg`
    /// header per the content endpoint's protocol.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>> {
        let arg = serde_json::to_string(&json!({ "path": path }))?;
        let bytes = self
            .client
            .post(DOWNLOAD_URL)
            .bearer_auth(&self.token)
            .header("Dropbox-API-Arg", arg)
            .send()
            .await
            .with_context(|| format!("POST files/download {}", path))?
            .error_for_status()
            .with_context(|| format!("download failed for {}", path))?
            .bytes()
            .await
            .with_context(|| format!("reading body of {}", path))?;
        Ok(bytes.to_vec())
    }
}
