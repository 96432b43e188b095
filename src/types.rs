//! Types for Graph API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Microsoft Graph endpoint.
pub const GRAPH_URL: &str = "https://graph.microsoft.com/v1.0/";

/// Token scope for the client-credentials grant.
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Configuration for connecting to a SharePoint site.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Human-facing site URL (e.g., "https://contoso.sharepoint.com/sites/engineering")
    pub site_url: String,
    /// Azure AD tenant id
    pub tenant_id: String,
    /// Application (client) id
    pub client_id: String,
    /// Client secret for the credentials grant
    pub client_secret: String,
    /// Graph endpoint, overridable for tests
    pub graph_url: String,
    /// Optional total-request deadline. Unset by default: transfers are
    /// unbounded in size, so callers own bounded latency.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config for the given site and credentials.
    pub fn new(
        site_url: impl Into<String>,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            graph_url: GRAPH_URL.to_string(),
            request_timeout: None,
        }
    }

    /// Point the client at a different Graph endpoint.
    pub fn with_graph_url(mut self, graph_url: impl Into<String>) -> Self {
        let mut url = graph_url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.graph_url = url;
        self
    }

    /// Impose a total-request deadline on every HTTP call, including
    /// body transfer.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Resolved connection state, created once during construction and
/// immutable afterward.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) graph_url: String,
    pub(crate) access_token: String,
    pub(crate) site_path: String,
    pub(crate) site_id: String,
    pub(crate) drive_id: String,
}

impl Session {
    /// Graph-form site address (`host:/collection/name:/`).
    pub fn site_path(&self) -> &str {
        &self.site_path
    }

    /// Resolved site identifier.
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Resolved identifier of the default document library.
    pub fn drive_id(&self) -> &str {
        &self.drive_id
    }
}

// =============================================================================
// Drive Item Types
// =============================================================================

/// A drive item as returned by Graph.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    pub name: String,
    pub size: Option<i64>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,
    pub web_url: Option<String>,
    /// Short-lived pre-authenticated content URL
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    pub download_url: Option<String>,
    pub created_by: Option<IdentitySet>,
    pub last_modified_by: Option<IdentitySet>,
    pub file: Option<FileFacet>,
    pub folder: Option<FolderFacet>,
    pub parent_reference: Option<ParentReference>,
}

/// Actor information attached to an item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentitySet {
    pub user: Option<Identity>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

/// File-specific facet (present for files, absent for folders).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacet {
    pub mime_type: Option<String>,
}

/// Folder-specific facet.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFacet {
    pub child_count: Option<i64>,
}

/// Parent folder reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    pub id: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub drive_id: Option<String>,
}

/// One page of a children listing.
#[derive(Debug, Deserialize)]
pub struct DriveItemPage {
    #[serde(default)]
    pub value: Vec<DriveItem>,
    /// Opaque continuation link for the next page
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// Flattened item summary attached to failed move/delete results.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub size: Option<i64>,
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
    pub web_url: Option<String>,
    pub file_type: Option<String>,
    pub parent_folder: Option<String>,
}

impl From<&DriveItem> for FileSummary {
    fn from(item: &DriveItem) -> Self {
        let display_name = |set: &Option<IdentitySet>| {
            set.as_ref()
                .and_then(|s| s.user.as_ref())
                .and_then(|u| u.display_name.clone())
        };

        Self {
            name: item.name.clone(),
            size: item.size,
            created_by: display_name(&item.created_by),
            last_modified_by: display_name(&item.last_modified_by),
            created_date: item.created_date_time,
            modified_date: item.last_modified_date_time,
            web_url: item.web_url.clone(),
            file_type: item.file.as_ref().and_then(|f| f.mime_type.clone()),
            parent_folder: item
                .parent_reference
                .as_ref()
                .and_then(|p| p.name.clone()),
        }
    }
}

// =============================================================================
// Operation Result Types
// =============================================================================

/// Failure category for move/delete results, selected by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    #[serde(rename = "Conflict")]
    Conflict,
    #[serde(rename = "File Locked")]
    FileLocked,
    #[serde(rename = "Permission Denied")]
    PermissionDenied,
    #[serde(rename = "File Not Found")]
    FileNotFound,
    #[serde(rename = "Bad Request")]
    BadRequest,
    /// Request never produced an HTTP response
    #[serde(rename = "Request Exception")]
    RequestFailed,
    #[serde(rename = "Unknown Error")]
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Conflict => "Conflict",
            Self::FileLocked => "File Locked",
            Self::PermissionDenied => "Permission Denied",
            Self::FileNotFound => "File Not Found",
            Self::BadRequest => "Bad Request",
            Self::RequestFailed => "Request Exception",
            Self::Unknown => "Unknown Error",
        };
        f.write_str(label)
    }
}

/// Structured failure detail for move/delete operations.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetails {
    /// Raw error text from the server or transport
    pub error: String,
    pub status_code: Option<u16>,
    pub error_type: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_causes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Error from the best-effort metadata fetch, if that also failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_error: Option<String>,
}

impl ErrorDetails {
    /// Detail record for a failure that never reached the server.
    pub(crate) fn transport(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status_code: None,
            error_type: ErrorCategory::RequestFailed,
            message: "An unexpected error occurred during the operation.".to_string(),
            possible_causes: Vec::new(),
            suggestion: None,
            source_path: None,
            destination_path: None,
            file_path: None,
            metadata_error: None,
        }
    }
}

/// Normalized outcome of a mutating operation (move, delete).
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    pub success: bool,
    pub error_code: Option<u16>,
    pub error_details: Option<ErrorDetails>,
    /// Best-effort source-file context attached to failures
    pub file_metadata: Option<FileSummary>,
}

impl OperationResult {
    pub(crate) fn ok() -> Self {
        Self {
            success: true,
            error_code: None,
            error_details: None,
            file_metadata: None,
        }
    }

    pub(crate) fn failed(
        error_code: Option<u16>,
        details: ErrorDetails,
        file_metadata: Option<FileSummary>,
    ) -> Self {
        Self {
            success: false,
            error_code,
            error_details: Some(details),
            file_metadata,
        }
    }
}
