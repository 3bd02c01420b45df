//! Session management for FIB API authentication.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

use crate::error::LoginError;
use crate::{Error, Result};

/// OAuth2 grant used for every token exchange.
pub const GRANT_TYPE: &str = "client_credentials";

/// Token endpoint, relative to the environment base URL.
pub const AUTHENTICATION_PATH: &str = "auth/realms/fib-online-shop/protocol/openid-connect/token";

/// Client id and secret issued by FIB to the integrating application.
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: SecretString,
}

impl Credentials {
    /// Create credentials from an id/secret pair.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    /// Read credentials from `FIB_CLIENT_ID` and `FIB_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| Error::Config(format!("{name} must be set")))
        };
        Ok(Self::new(read("FIB_CLIENT_ID")?, read("FIB_CLIENT_SECRET")?))
    }

    /// The client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// Access and refresh tokens from the most recent authentication.
#[derive(Clone)]
pub struct TokenPair {
    access_token: SecretString,
    refresh_token: SecretString,
    token_type: String,
    scope: Option<String>,
    expires_in: Duration,
    refresh_expires_in: Option<Duration>,
    expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// The bearer token sent with payment calls.
    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// The refresh token issued alongside the access token.
    pub fn refresh_token(&self) -> &SecretString {
        &self.refresh_token
    }

    /// Token type, normally `Bearer`.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Granted scopes, if reported.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Lifetime of the access token.
    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Lifetime of the refresh token, if reported.
    pub fn refresh_expires_in(&self) -> Option<Duration> {
        self.refresh_expires_in
    }

    /// Absolute expiry of the access token.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` once now is strictly after the expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Returns `true` if the access token expires within `buffer`.
    ///
    /// A zero buffer is equivalent to [`is_expired`](Self::is_expired).
    pub fn expires_within(&self, buffer: Duration) -> bool {
        if buffer.is_zero() {
            return self.is_expired();
        }
        match Utc::now().checked_add_signed(buffer) {
            Some(deadline) => deadline >= self.expires_at,
            None => true,
        }
    }

    fn from_response(response: TokenResponse, issued_at: DateTime<Utc>) -> Result<Self> {
        let lifetime = |secs: i64| {
            Duration::try_seconds(secs)
                .ok_or_else(|| Error::InvalidResponse(format!("token lifetime out of range: {secs}")))
        };

        let expires_in = lifetime(response.expires_in)?;
        let refresh_expires_in = response.refresh_expires_in.map(lifetime).transpose()?;
        let expires_at = issued_at.checked_add_signed(expires_in).ok_or_else(|| {
            Error::InvalidResponse(format!(
                "token expiry out of range: {}",
                response.expires_in
            ))
        })?;

        Ok(Self {
            access_token: SecretString::from(response.access_token),
            refresh_token: SecretString::from(response.refresh_token),
            token_type: response.token_type,
            scope: response.scope,
            expires_in,
            refresh_expires_in,
            expires_at,
        })
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Authentication session for the FIB API.
///
/// Holds the credentials and the current [`TokenPair`]. Clones share the
/// same token pair; a refresh replaces the whole pair under a write lock,
/// so readers never observe a half-updated pair.
#[derive(Clone)]
pub struct Session {
    http: reqwest::Client,
    token_url: Url,
    credentials: Arc<Credentials>,
    tokens: Arc<RwLock<TokenPair>>,
}

impl Session {
    /// Exchange the credentials for a token pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Login`] when the identity endpoint rejects the
    /// credentials, and transport or decoding errors otherwise.
    pub async fn authenticate(
        http: reqwest::Client,
        base_url: &Url,
        credentials: Credentials,
    ) -> Result<Self> {
        let token_url = base_url.join(AUTHENTICATION_PATH)?;
        let tokens = Self::exchange_token(&http, &token_url, &credentials).await?;

        Ok(Self {
            http,
            token_url,
            credentials: Arc::new(credentials),
            tokens: Arc::new(RwLock::new(tokens)),
        })
    }

    /// Re-run the token exchange and replace the token pair.
    ///
    /// On failure the previous token pair is kept.
    pub async fn refresh(&self) -> Result<()> {
        let mut tokens = self.tokens.write().await;
        *tokens = Self::exchange_token(&self.http, &self.token_url, &self.credentials).await?;
        Ok(())
    }

    /// Re-authenticate if the access token has expired.
    ///
    /// Returns `true` if a new token pair was obtained.
    pub async fn refresh_if_needed(&self) -> Result<bool> {
        self.refresh_if_expiring(Duration::zero()).await
    }

    /// Re-authenticate if the access token expires within `buffer`.
    ///
    /// Returns `true` if a new token pair was obtained.
    pub async fn refresh_if_expiring(&self, buffer: Duration) -> Result<bool> {
        if !self.expires_within(buffer).await {
            return Ok(false);
        }

        let mut tokens = self.tokens.write().await;
        // Another task may have refreshed while we waited for the lock.
        if !tokens.expires_within(buffer) {
            return Ok(false);
        }
        *tokens = Self::exchange_token(&self.http, &self.token_url, &self.credentials).await?;
        Ok(true)
    }

    /// Check if the access token has expired.
    pub async fn is_expired(&self) -> bool {
        self.tokens.read().await.is_expired()
    }

    /// Check if the access token will expire within the given buffer.
    pub async fn expires_within(&self, buffer: Duration) -> bool {
        self.tokens.read().await.expires_within(buffer)
    }

    /// Get the access token expiration time.
    pub async fn expires_at(&self) -> DateTime<Utc> {
        self.tokens.read().await.expires_at
    }

    /// Snapshot of the current token pair.
    pub async fn tokens(&self) -> TokenPair {
        self.tokens.read().await.clone()
    }

    /// The credentials this session authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the current access token without checking expiry.
    pub(crate) async fn access_token(&self) -> SecretString {
        self.tokens.read().await.access_token.clone()
    }

    async fn exchange_token(
        http: &reqwest::Client,
        token_url: &Url,
        credentials: &Credentials,
    ) -> Result<TokenPair> {
        tracing::debug!(url = %token_url, client_id = %credentials.client_id, "requesting access token");

        let issued_at = Utc::now();
        let response = http
            .post(token_url.clone())
            .form(&[
                ("grant_type", GRANT_TYPE),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.expose_secret()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_client_error() {
            let login_error: LoginError = serde_json::from_slice(&body)?;
            tracing::warn!(status = status.as_u16(), error = %login_error, "authentication rejected");
            return Err(Error::Login(login_error));
        }

        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let token_response: TokenResponse = serde_json::from_slice(&body)?;
        let tokens = TokenPair::from_response(token_response, issued_at)?;
        tracing::info!(expires_at = %tokens.expires_at, "authenticated with FIB");
        Ok(tokens)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.credentials.client_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    expires_in: i64,
    #[serde(default)]
    refresh_expires_in: Option<i64>,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    scope: Option<String>,
}
