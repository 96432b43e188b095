//! File upload operations.

use crate::error::{ClientError, Result};
use crate::path::encode_remote_path;
use crate::types::{DriveItem, Session};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, info};

/// Upload client for a SharePoint document library.
pub struct UploadClient<'a> {
    http: &'a Client,
    session: &'a Session,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, session: &'a Session) -> Self {
        Self { http, session }
    }

    /// Upload a local file to a relative path in the library.
    ///
    /// The whole file is read into memory and sent as a single PUT to the
    /// content endpoint. There is no resumable upload session, so files
    /// above the single-request ceiling must be rejected or chunked by
    /// the caller.
    ///
    /// # Returns
    /// The created or replaced item descriptor.
    pub async fn upload_file(&self, remote_path: &str, local_path: &Path) -> Result<DriveItem> {
        if !local_path.exists() {
            return Err(ClientError::FileNotFound(
                local_path.display().to_string(),
            ));
        }

        let contents = tokio::fs::read(local_path).await?;
        let size = contents.len();

        let url = format!(
            "{}drives/{}/root:/{}:/content",
            self.session.graph_url,
            self.session.drive_id,
            encode_remote_path(remote_path)
        );
        debug!(url = %url, path = %remote_path, size = size, "Uploading file");

        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.session.access_token)
            .body(contents)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let item: DriveItem = response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse upload response: {}", e))
            })?;

            info!(path = %remote_path, id = %item.id, size = size, "File uploaded");
            Ok(item)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::from_status(status.as_u16(), error_text))
        }
    }
}
