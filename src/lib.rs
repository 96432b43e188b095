//! SharePoint Drive Client
//!
//! HTTP client library for files in a SharePoint document library,
//! addressed by relative path via the Microsoft Graph API.
//!
//! # Features
//!
//! - **Authentication**: OAuth2 client-credentials grant behind a
//!   [`TokenProvider`] seam
//! - **Listing**: paginated folder enumeration with a hard result cap
//! - **Transfer**: streamed downloads, single-request uploads
//! - **Mutation**: move and delete with categorized failure details
//!
//! # Example
//!
//! ```ignore
//! use sharepoint_drive_client::{ClientConfig, ClientCredentialsProvider, SharePointClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new(
//!         "https://contoso.sharepoint.com/sites/engineering",
//!         "tenant-id",
//!         "client-id",
//!         "client-secret",
//!     );
//!     let tokens = ClientCredentialsProvider::new();
//!     let client = SharePointClient::connect(config, &tokens).await?;
//!
//!     for item in client.list_files("reports").await? {
//!         println!("{} ({} bytes)", item.name, item.size.unwrap_or(0));
//!     }
//!
//!     client
//!         .download_file("reports/q1 summary.pdf", "local/q1.pdf".as_ref())
//!         .await?;
//!
//!     let moved = client.move_file("reports/q1.pdf", "archive/q1.pdf", false).await;
//!     if !moved.success {
//!         eprintln!("move failed: {:?}", moved.error_details);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod download;
mod error;
mod items;
mod path;
mod types;
mod upload;

// Re-export main types
pub use client::SharePointClient;
pub use error::{ClientError, Result};
pub use items::MAX_LIST_RESULTS;
pub use path::encode_remote_path;
pub use types::{
    ClientConfig, DriveItem, DriveItemPage, ErrorCategory, ErrorDetails, FileFacet, FileSummary,
    FolderFacet, Identity, IdentitySet, OperationResult, ParentReference, Session, GRAPH_SCOPE,
    GRAPH_URL,
};

// Re-export auth seam and sub-clients for direct use if needed
pub use auth::{ClientCredentialsProvider, TokenProvider};
pub use download::DownloadClient;
pub use items::ItemsClient;
pub use upload::UploadClient;
