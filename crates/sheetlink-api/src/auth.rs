//! Bearer token acquisition.
//!
//! The transport treats authentication as an opaque capability: anything
//! that can produce an access token string can authenticate requests.
//! Two providers are built in — a pre-minted static token, and the
//! stored-refresh-token exchange (client credentials + refresh token
//! traded at the OAuth token endpoint). Heavier flows (service-account
//! key signing, interactive consent) belong to a dedicated auth library
//! and plug in through the same trait.

use serde::Deserialize;

use crate::error::{ApiError, Result};

/// Default OAuth 2.0 token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Source of bearer access tokens.
#[allow(async_fn_in_trait)]
pub trait TokenProvider {
    /// Produce a token valid for the next request. Called per request;
    /// providers that cache or refresh do so internally.
    async fn access_token(&self) -> Result<String>;
}

/// A fixed, pre-minted access token. Useful for short-lived tooling and
/// for tests.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken {
            token: token.into(),
        }
    }
}

impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// OAuth client credentials, as found in a downloaded client secret file
/// (`{"installed": {...}}` or `{"web": {...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct ClientSecretFile {
    installed: Option<OAuthClient>,
    web: Option<OAuthClient>,
}

impl OAuthClient {
    /// Parse a client secret JSON document, accepting either the
    /// `installed` or `web` application shape.
    pub fn from_client_secret_json(json: &[u8]) -> Result<Self> {
        let file: ClientSecretFile = serde_json::from_slice(json)
            .map_err(|e| ApiError::Auth(format!("invalid client secret JSON: {e}")))?;
        file.installed
            .or(file.web)
            .ok_or_else(|| ApiError::Auth("client secret JSON has no installed/web section".into()))
    }
}

/// A stored OAuth token document (the file written after an interactive
/// consent flow). Only the refresh token is consumed here.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredToken {
    #[serde(default)]
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl StoredToken {
    pub fn from_json(json: &[u8]) -> Result<Self> {
        serde_json::from_slice(json)
            .map_err(|e| ApiError::Auth(format!("invalid stored token JSON: {e}")))
    }
}

/// Exchanges a stored refresh token for a fresh access token on every
/// request.
#[derive(Debug, Clone)]
pub struct RefreshTokenFlow {
    http: reqwest::Client,
    client: OAuthClient,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl RefreshTokenFlow {
    pub fn new(client: OAuthClient, refresh_token: impl Into<String>) -> Self {
        RefreshTokenFlow {
            http: reqwest::Client::new(),
            client,
            refresh_token: refresh_token.into(),
        }
    }

    /// Build the flow from the two JSON documents the stored-credential
    /// setup leaves behind: the client secret file and the token file.
    pub fn from_stored(client_secret_json: &[u8], token_json: &[u8]) -> Result<Self> {
        let client = OAuthClient::from_client_secret_json(client_secret_json)?;
        let token = StoredToken::from_json(token_json)?;
        let refresh_token = token
            .refresh_token
            .ok_or_else(|| ApiError::Auth("stored token has no refresh_token".into()))?;
        Ok(RefreshTokenFlow::new(client, refresh_token))
    }
}

impl TokenProvider for RefreshTokenFlow {
    async fn access_token(&self) -> Result<String> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client.client_id.as_str()),
            ("client_secret", self.client.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
        ];
        let response = self
            .http
            .post(&self.client.token_uri)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Auth(format!("invalid token endpoint response: {e}")))?;
        Ok(token.access_token)
    }
}
