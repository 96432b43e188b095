//! Main SharePoint drive client.

use crate::auth::TokenProvider;
use crate::download::DownloadClient;
use crate::error::{ClientError, Result};
use crate::items::ItemsClient;
use crate::types::{ClientConfig, DriveItem, OperationResult, Session, GRAPH_SCOPE};
use crate::upload::UploadClient;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Client for a single SharePoint document library.
///
/// Construction resolves the site URL and credentials into a site id and
/// the id of the default document library; operations address files by
/// path relative to the library root. The resolved [`Session`] is
/// immutable, so one client may be shared across tasks for sequential or
/// concurrent reads.
///
/// # Example
///
/// ```ignore
/// use sharepoint_drive_client::{ClientConfig, ClientCredentialsProvider, SharePointClient};
///
/// let config = ClientConfig::new(
///     "https://contoso.sharepoint.com/sites/engineering",
///     "tenant-id",
///     "client-id",
///     "client-secret",
/// );
/// let tokens = ClientCredentialsProvider::new();
/// let client = SharePointClient::connect(config, &tokens).await?;
///
/// let files = client.list_files("reports").await?;
/// println!("Found {} files", files.len());
/// ```
#[derive(Debug)]
pub struct SharePointClient {
    http: Client,
    session: Session,
}

impl SharePointClient {
    /// Connect to the site described by `config`.
    ///
    /// Acquires a bearer token from the provider, then resolves the site
    /// id and the default document-library id. Fails with a
    /// distinguishable error if the site URL is malformed, the provider
    /// yields no usable token, or either lookup returns an error payload.
    pub async fn connect(config: ClientConfig, tokens: &dyn TokenProvider) -> Result<Self> {
        let site_path = parse_site_url(&config.site_url)?;

        let access_token = tokens
            .acquire_token(
                &config.tenant_id,
                &config.client_id,
                &config.client_secret,
                GRAPH_SCOPE,
            )
            .await?;
        if access_token.is_empty() {
            return Err(ClientError::AuthFailed(
                "token provider returned an empty token".to_string(),
            ));
        }

        // No default total-request deadline: transfer sizes are unbounded,
        // so only connection establishment is time-limited unless the
        // caller configures a deadline.
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!(
                "sharepoint-drive-client/{}",
                env!("CARGO_PKG_VERSION")
            ));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let url = format!("{}sites/{}", config.graph_url, site_path);
        debug!(url = %url, "Resolving site id");
        let response = http.get(&url).bearer_auth(&access_token).send().await?;
        let site_id = extract_resource_id(response, "site").await?;

        let url = format!("{}sites/{}/drive/", config.graph_url, site_id);
        debug!(url = %url, "Resolving default drive id");
        let response = http.get(&url).bearer_auth(&access_token).send().await?;
        let drive_id = extract_resource_id(response, "drive").await?;

        info!(site_id = %site_id, drive_id = %drive_id, "Connected to document library");

        Ok(Self {
            http,
            session: Session {
                graph_url: config.graph_url,
                access_token,
                site_path,
                site_id,
                drive_id,
            },
        })
    }

    /// The resolved session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolved site identifier.
    pub fn site_id(&self) -> &str {
        self.session.site_id()
    }

    /// Resolved identifier of the default document library.
    pub fn drive_id(&self) -> &str {
        self.session.drive_id()
    }

    /// Item operations: listing, metadata, move, delete.
    pub fn items(&self) -> ItemsClient<'_> {
        ItemsClient::new(&self.http, &self.session)
    }

    /// Content download operations.
    pub fn download(&self) -> DownloadClient<'_> {
        DownloadClient::new(&self.http, &self.session)
    }

    /// Content upload operations.
    pub fn upload(&self) -> UploadClient<'_> {
        UploadClient::new(&self.http, &self.session)
    }

    /// List every child item of a folder, following continuation pages.
    ///
    /// See [`ItemsClient::list_files`].
    pub async fn list_files(&self, folder_path: &str) -> Result<Vec<DriveItem>> {
        self.items().list_files(folder_path).await
    }

    /// Fetch the descriptor of a file by relative path.
    pub async fn get_file_metadata(&self, remote_path: &str) -> Result<DriveItem> {
        self.items().get_file_metadata(remote_path).await
    }

    /// Move a file to a new path, optionally replacing the destination.
    pub async fn move_file(
        &self,
        src_path: &str,
        dest_path: &str,
        replace: bool,
    ) -> OperationResult {
        self.items().move_file(src_path, dest_path, replace).await
    }

    /// Delete a file by relative path.
    pub async fn delete_file(&self, remote_path: &str) -> OperationResult {
        self.items().delete_file(remote_path).await
    }

    /// Download a file to a local path, returning the bytes written.
    pub async fn download_file(&self, remote_path: &str, local_path: &Path) -> Result<u64> {
        self.download().download_file(remote_path, local_path).await
    }

    /// Upload a local file to a relative path in the library.
    pub async fn upload_file(&self, remote_path: &str, local_path: &Path) -> Result<DriveItem> {
        self.upload().upload_file(remote_path, local_path).await
    }
}

/// Rebuild a human-facing site URL into the Graph addressing form
/// `host:/collection/name:/`.
fn parse_site_url(site_url: &str) -> Result<String> {
    if !site_url.starts_with("https://") {
        return Err(ClientError::InvalidSiteUrl(
            "site URL must start with https://".to_string(),
        ));
    }

    // ["https:", "", host, collection, name, ...]
    let parts: Vec<&str> = site_url.split('/').collect();
    if parts.len() < 5 || parts[2].is_empty() || parts[3].is_empty() || parts[4].is_empty() {
        return Err(ClientError::InvalidSiteUrl(format!(
            "expected https://<host>/<collection>/<site>, got {}",
            site_url
        )));
    }

    Ok(format!("{}:/{}/{}:/", parts[2], parts[3], parts[4]))
}

#[derive(Debug, Deserialize)]
struct ResourceIdResponse {
    id: Option<String>,
    error: Option<GraphErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    #[allow(dead_code)]
    code: Option<String>,
    message: Option<String>,
}

/// Pull the `id` out of a site/drive lookup response, surfacing Graph
/// error payloads as a resolution failure instead of a missing-key fault.
async fn extract_resource_id(response: reqwest::Response, stage: &'static str) -> Result<String> {
    let status = response.status();
    let body: ResourceIdResponse = response.json().await.map_err(|e| {
        ClientError::Parse(format!("Failed to parse {} lookup response: {}", stage, e))
    })?;

    if let Some(error) = body.error {
        return Err(ClientError::SiteResolution {
            stage,
            message: error
                .message
                .unwrap_or_else(|| format!("lookup returned status {}", status)),
        });
    }

    match body.id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ClientError::SiteResolution {
            stage,
            message: format!("lookup response contained no id (status {})", status),
        }),
    }
}
