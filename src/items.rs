//! Item operations: listing, metadata, move, delete.

use crate::error::{ClientError, Result};
use crate::path::{encode_remote_path, split_dest_path};
use crate::types::{
    DriveItem, DriveItemPage, ErrorCategory, ErrorDetails, FileSummary, OperationResult, Session,
};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Listing hard cap. Enumerations past this point fail instead of
/// returning a truncated or unbounded list.
pub const MAX_LIST_RESULTS: usize = 5000;

/// Item client for a SharePoint document library.
pub struct ItemsClient<'a> {
    http: &'a Client,
    session: &'a Session,
}

impl<'a> ItemsClient<'a> {
    pub(crate) fn new(http: &'a Client, session: &'a Session) -> Self {
        Self { http, session }
    }

    fn item_url(&self, encoded_path: &str) -> String {
        format!(
            "{}drives/{}/root:/{}",
            self.session.graph_url, self.session.drive_id, encoded_path
        )
    }

    /// List every child item of a folder, following `@odata.nextLink`
    /// continuation pages until exhausted.
    ///
    /// Fails with [`ClientError::TooManyResults`] once more than
    /// [`MAX_LIST_RESULTS`] entries accumulate. An empty folder path
    /// lists the library root.
    pub async fn list_files(&self, folder_path: &str) -> Result<Vec<DriveItem>> {
        let encoded = encode_remote_path(folder_path);
        let first_url = if encoded.is_empty() {
            format!(
                "{}drives/{}/root/children",
                self.session.graph_url, self.session.drive_id
            )
        } else {
            format!(
                "{}drives/{}/root:/{}:/children",
                self.session.graph_url, self.session.drive_id, encoded
            )
        };
        debug!(url = %first_url, folder = %folder_path, "Listing folder");

        let mut files = Vec::new();
        let mut next_url = first_url;

        loop {
            let response = self
                .http
                .get(&next_url)
                .bearer_auth(&self.session.access_token)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(ClientError::from_status(status.as_u16(), error_text));
            }

            let page: DriveItemPage = response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse listing page: {}", e))
            })?;
            files.extend(page.value);

            if files.len() > MAX_LIST_RESULTS {
                return Err(ClientError::TooManyResults {
                    count: files.len(),
                    limit: MAX_LIST_RESULTS,
                });
            }

            match page.next_link {
                Some(link) => next_url = link,
                None => break,
            }
        }

        debug!(folder = %folder_path, count = files.len(), "Folder listed");
        Ok(files)
    }

    /// Fetch the descriptor of a file by relative path.
    pub async fn get_file_metadata(&self, remote_path: &str) -> Result<DriveItem> {
        let url = self.item_url(&encode_remote_path(remote_path));
        debug!(url = %url, path = %remote_path, "Fetching item metadata");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.session.access_token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse item metadata: {}", e))
            })
        } else if status.as_u16() == 404 {
            Err(ClientError::NotFound(remote_path.to_string()))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::from_status(status.as_u16(), error_text))
        }
    }

    /// Move a file to a new path within the library.
    ///
    /// The destination path is split into directory and filename; the
    /// source item is PATCHed with a parent reference addressing the
    /// destination directory. With `replace` set, an existing destination
    /// file is overwritten; otherwise the server reports a conflict.
    pub async fn move_file(
        &self,
        src_path: &str,
        dest_path: &str,
        replace: bool,
    ) -> OperationResult {
        let (dest_dir, dest_name) = split_dest_path(dest_path);
        let parent_path = if dest_dir.is_empty() {
            format!("drives/{}/root:", self.session.drive_id)
        } else {
            format!("drives/{}/root:/{}", self.session.drive_id, dest_dir)
        };

        let mut payload = serde_json::json!({
            "parentReference": { "path": parent_path },
            "name": dest_name,
        });
        if replace {
            payload["@microsoft.graph.conflictBehavior"] =
                serde_json::Value::String("replace".to_string());
        }

        let url = self.item_url(&encode_remote_path(src_path));
        debug!(url = %url, src = %src_path, dest = %dest_path, replace = replace, "Moving item");

        let response = match self
            .http
            .patch(&url)
            .bearer_auth(&self.session.access_token)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(src = %src_path, error = %e, "Move request failed without a response");
                let mut details = ErrorDetails::transport(e.to_string());
                details.source_path = Some(src_path.to_string());
                details.destination_path = Some(dest_path.to_string());
                return OperationResult::failed(None, details, None);
            }
        };

        let status = response.status();
        if status.is_success() {
            info!(src = %src_path, dest = %dest_path, "Item moved");
            return OperationResult::ok();
        }

        let error_text = response.text().await.unwrap_or_default();
        let (file_metadata, metadata_error) = self.fetch_context_metadata(src_path).await;

        let mut details = categorize_move(status.as_u16(), &error_text);
        details.source_path = Some(src_path.to_string());
        details.destination_path = Some(dest_path.to_string());
        details.metadata_error = metadata_error;

        warn!(
            src = %src_path,
            dest = %dest_path,
            status = status.as_u16(),
            category = %details.error_type,
            "Move failed"
        );
        OperationResult::failed(Some(status.as_u16()), details, file_metadata)
    }

    /// Delete a file by relative path.
    pub async fn delete_file(&self, remote_path: &str) -> OperationResult {
        let url = self.item_url(&encode_remote_path(remote_path));
        debug!(url = %url, path = %remote_path, "Deleting item");

        let response = match self
            .http
            .delete(&url)
            .bearer_auth(&self.session.access_token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(path = %remote_path, error = %e, "Delete request failed without a response");
                let mut details = ErrorDetails::transport(e.to_string());
                details.file_path = Some(remote_path.to_string());
                return OperationResult::failed(None, details, None);
            }
        };

        let status = response.status();
        if status.is_success() {
            info!(path = %remote_path, "Item deleted");
            return OperationResult::ok();
        }

        let error_text = response.text().await.unwrap_or_default();
        let (file_metadata, metadata_error) = self.fetch_context_metadata(remote_path).await;

        let mut details = categorize_delete(status.as_u16(), &error_text);
        details.file_path = Some(remote_path.to_string());
        details.metadata_error = metadata_error;

        warn!(
            path = %remote_path,
            status = status.as_u16(),
            category = %details.error_type,
            "Delete failed"
        );
        OperationResult::failed(Some(status.as_u16()), details, file_metadata)
    }

    /// Best-effort metadata fetch for failure context. A failure here is
    /// recorded but never fails the surrounding operation.
    async fn fetch_context_metadata(
        &self,
        remote_path: &str,
    ) -> (Option<FileSummary>, Option<String>) {
        match self.get_file_metadata(remote_path).await {
            Ok(item) => (Some(FileSummary::from(&item)), None),
            Err(e) => (None, Some(e.to_string())),
        }
    }
}

fn causes(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn categorize_move(status: u16, error_text: &str) -> ErrorDetails {
    let (error_type, message, possible_causes, suggestion) = match status {
        409 => (
            ErrorCategory::Conflict,
            "A file with the same name already exists at the destination.".to_string(),
            causes(&[
                "Destination file already exists and replace=false",
                "File is being synchronized",
                "File has pending changes",
                "Destination folder has conflicting permissions",
            ]),
            Some("Set replace=true to overwrite the existing file".to_string()),
        ),
        423 => (
            ErrorCategory::FileLocked,
            "File is currently locked and cannot be moved.".to_string(),
            causes(&[
                "File is being edited by another user",
                "File is checked out",
                "File has active sharing permissions",
                "File is in a protected library or folder",
            ]),
            None,
        ),
        403 => (
            ErrorCategory::PermissionDenied,
            "You do not have permission to move this file.".to_string(),
            causes(&[
                "Insufficient permissions on the source file",
                "Insufficient permissions on the destination folder",
                "File is in a protected folder",
                "Your account lacks move permissions",
            ]),
            None,
        ),
        404 => (
            ErrorCategory::FileNotFound,
            "The specified source file does not exist or cannot be found.".to_string(),
            Vec::new(),
            None,
        ),
        400 => (
            ErrorCategory::BadRequest,
            "Invalid request parameters.".to_string(),
            causes(&[
                "Invalid file path format",
                "Invalid destination path",
                "Source and destination are the same",
                "Invalid file name characters",
            ]),
            None,
        ),
        _ => (
            ErrorCategory::Unknown,
            format!("Unexpected error occurred (status {})", status),
            Vec::new(),
            None,
        ),
    };

    ErrorDetails {
        error: error_text.to_string(),
        status_code: Some(status),
        error_type,
        message,
        possible_causes,
        suggestion,
        source_path: None,
        destination_path: None,
        file_path: None,
        metadata_error: None,
    }
}

fn categorize_delete(status: u16, error_text: &str) -> ErrorDetails {
    let (error_type, message, possible_causes) = match status {
        423 => (
            ErrorCategory::FileLocked,
            "File is currently locked and cannot be deleted.".to_string(),
            causes(&[
                "File is being edited by another user",
                "File is checked out",
                "File has active sharing permissions",
                "File is in a protected library or folder",
            ]),
        ),
        403 => (
            ErrorCategory::PermissionDenied,
            "You do not have permission to delete this file.".to_string(),
            causes(&[
                "Insufficient permissions on the file",
                "File is in a protected folder",
                "File has special permissions",
                "Your account lacks delete permissions",
            ]),
        ),
        404 => (
            ErrorCategory::FileNotFound,
            "The specified file does not exist or cannot be found.".to_string(),
            Vec::new(),
        ),
        409 => (
            ErrorCategory::Conflict,
            "There is a conflict preventing file deletion.".to_string(),
            causes(&[
                "File is being synchronized",
                "File has pending changes",
                "File is in a state that prevents deletion",
            ]),
        ),
        _ => (
            ErrorCategory::Unknown,
            format!("Unexpected error occurred (status {})", status),
            Vec::new(),
        ),
    };

    ErrorDetails {
        error: error_text.to_string(),
        status_code: Some(status),
        error_type,
        message,
        possible_causes,
        suggestion: None,
        source_path: None,
        destination_path: None,
        file_path: None,
        metadata_error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_categorization() {
        let details = categorize_move(409, "conflict body");
        assert_eq!(details.error_type, ErrorCategory::Conflict);
        assert!(details.suggestion.is_some());
        assert_eq!(details.error, "conflict body");

        let details = categorize_move(423, "");
        assert_eq!(details.error_type, ErrorCategory::FileLocked);
        assert!(details.suggestion.is_none());

        let details = categorize_move(500, "");
        assert_eq!(details.error_type, ErrorCategory::Unknown);
        assert!(details.message.contains("500"));
    }

    #[test]
    fn test_delete_categorization() {
        let details = categorize_delete(404, "");
        assert_eq!(details.error_type, ErrorCategory::FileNotFound);
        assert!(details.possible_causes.is_empty());

        let details = categorize_delete(409, "");
        assert_eq!(details.error_type, ErrorCategory::Conflict);
        assert!(!details.possible_causes.is_empty());
        // No remediation suggestion on delete conflicts
        assert!(details.suggestion.is_none());
    }
}
