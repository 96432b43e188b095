//! File download operations.

use crate::error::{ClientError, Result};
use crate::path::encode_remote_path;
use crate::types::{DriveItem, Session};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Download client for a SharePoint document library.
pub struct DownloadClient<'a> {
    http: &'a Client,
    session: &'a Session,
}

impl<'a> DownloadClient<'a> {
    pub(crate) fn new(http: &'a Client, session: &'a Session) -> Self {
        Self { http, session }
    }

    /// Download a file by relative path.
    ///
    /// Fetches the item descriptor, extracts the short-lived direct
    /// content URL, then streams the body chunk-by-chunk to `local_path`,
    /// creating parent directories as needed. The body is never buffered
    /// whole in memory.
    ///
    /// # Returns
    /// The number of bytes written.
    pub async fn download_file(&self, remote_path: &str, local_path: &Path) -> Result<u64> {
        let url = format!(
            "{}drives/{}/root:/{}",
            self.session.graph_url,
            self.session.drive_id,
            encode_remote_path(remote_path)
        );
        debug!(url = %url, path = %remote_path, dest = %local_path.display(), "Requesting item descriptor");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.session.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 404 {
                return Err(ClientError::NotFound(remote_path.to_string()));
            }
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status.as_u16(), error_text));
        }

        let item: DriveItem = response.json().await.map_err(|e| {
            ClientError::Parse(format!("Failed to parse item descriptor: {}", e))
        })?;

        let download_url = item
            .download_url
            .ok_or_else(|| ClientError::MissingDownloadUrl(remote_path.to_string()))?;

        self.download_from_url(&download_url, local_path).await
    }

    /// Stream a pre-authenticated content URL to a local file.
    ///
    /// The URL already embeds its authorization, so no bearer header is
    /// attached.
    pub async fn download_from_url(&self, url: &str, local_path: &Path) -> Result<u64> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status.as_u16(), error_text));
        }

        if let Some(parent) = local_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = File::create(local_path).await?;
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;

        info!(dest = %local_path.display(), size = written, "File downloaded");
        Ok(written)
    }
}
