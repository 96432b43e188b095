//! Token acquisition for the Graph API.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

/// Default Azure AD authority host.
const AUTHORITY_URL: &str = "https://login.microsoftonline.com";

/// External collaborator that exchanges application credentials for a
/// bearer token. Used once at construction.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Acquire a bearer access token for the given scope.
    async fn acquire_token(
        &self,
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
        scope: &str,
    ) -> Result<String>;
}

/// Token provider implementing the OAuth2 client-credentials grant
/// against the Azure AD v2 token endpoint.
pub struct ClientCredentialsProvider {
    http: Client,
    authority_url: String,
}

impl ClientCredentialsProvider {
    pub fn new() -> Self {
        Self::with_authority(AUTHORITY_URL)
    }

    /// Use a non-default authority (e.g., a sovereign cloud or a mock server).
    pub fn with_authority(authority_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            authority_url: authority_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ClientCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[async_trait]
impl TokenProvider for ClientCredentialsProvider {
    async fn acquire_token(
        &self,
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
        scope: &str,
    ) -> Result<String> {
        let url = format!("{}/{}/oauth2/v2.0/token", self.authority_url, tenant_id);
        debug!(url = %url, client_id = %client_id, scope = %scope, "Requesting access token");

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", scope),
            ("grant_type", "client_credentials"),
        ];

        let response = self.http.post(&url).form(&params).send().await?;
        let status = response.status();

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            ClientError::Parse(format!("Failed to parse token response: {}", e))
        })?;

        match token_response.access_token {
            Some(token) if !token.is_empty() => {
                debug!("Access token acquired");
                Ok(token)
            }
            _ => {
                let reason = token_response
                    .error_description
                    .or(token_response.error)
                    .unwrap_or_else(|| {
                        format!("token endpoint returned {} without an access token", status)
                    });
                warn!(status = %status, reason = %reason, "Token acquisition failed");
                Err(ClientError::AuthFailed(reason))
            }
        }
    }
}
