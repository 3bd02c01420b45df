//! HTTP client implementation for the FIB API.

use chrono::Duration;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use url::Url;

use crate::api::PaymentsService;
use crate::auth::{Credentials, Session};
use crate::error::ErrorBody;
use crate::{Environment, Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the FIB API.
///
/// Creating a client authenticates immediately. Payment operations are
/// reached through [`payments`](Self::payments).
///
/// # Example
///
/// ```no_run
/// use fib_rs::{Environment, FibClient};
/// use fib_rs::models::PaymentOptions;
///
/// # async fn example() -> fib_rs::Result<()> {
/// let client = FibClient::new("client-id", "client-secret", Environment::Staging).await?;
///
/// let created = client
///     .payments()
///     .create(1000, "IQD", "https://shop.example/fib/callback", PaymentOptions::new())
///     .await?;
/// let status = client.payments().check(&created.payment_id).await?;
/// println!("{}: {:?}", created.readable_code, status.status);
/// # Ok(())
/// # }
/// ```
pub struct FibClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
    pub(crate) environment: Environment,
    pub(crate) base_url: Url,
}

impl FibClient {
    /// Authenticate with a client id and secret using the default
    /// configuration.
    pub async fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        env: Environment,
    ) -> Result<Self> {
        Self::with_config(
            Credentials::new(client_id, client_secret),
            env,
            ClientConfig::default(),
        )
        .await
    }

    /// Authenticate with credentials read from `FIB_CLIENT_ID` and
    /// `FIB_CLIENT_SECRET`.
    pub async fn from_env(env: Environment) -> Result<Self> {
        Self::with_config(Credentials::from_env()?, env, ClientConfig::default()).await
    }

    /// Authenticate with custom configuration.
    pub async fn with_config(
        credentials: Credentials,
        env: Environment,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let base_url = parse_base_url(config.base_url.as_deref().unwrap_or(env.api_base_url()))?;
        let session = Session::authenticate(http.clone(), &base_url, credentials).await?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                session,
                config,
                environment: env,
                base_url,
            }),
        })
    }

    /// Get the payments service.
    pub fn payments(&self) -> PaymentsService {
        PaymentsService::new(self.inner.clone())
    }

    /// Check whether the access token has expired.
    pub async fn is_token_expired(&self) -> bool {
        self.inner.session.is_expired().await
    }

    /// Re-authenticate if the access token has expired.
    ///
    /// Payment calls do not do this on their own unless automatic refresh is
    /// enabled in [`ClientConfig`]. Returns `true` if a new token was
    /// obtained.
    pub async fn refresh_token_if_needed(&self) -> Result<bool> {
        self.inner.session.refresh_if_needed().await
    }

    /// Re-authenticate unconditionally.
    pub async fn authenticate(&self) -> Result<()> {
        self.inner.session.refresh().await
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// The environment this client was created for.
    pub fn environment(&self) -> Environment {
        self.inner.environment
    }

    /// The base URL all requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }
}

/// Outcome of a request that the gateway accepted.
pub(crate) enum Reply {
    Content(Vec<u8>),
    NoContent,
}

impl Reply {
    fn json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Reply::Content(body) => Ok(serde_json::from_slice(&body)?),
            Reply::NoContent => Err(Error::UnexpectedStatus {
                status: StatusCode::NO_CONTENT.as_u16(),
                body: String::new(),
            }),
        }
    }
}

impl ClientInner {
    /// Refresh the token first when automatic refresh is enabled.
    pub(crate) async fn ensure_session_valid(&self) -> Result<()> {
        if self.config.auto_refresh_session {
            let buffer = Duration::try_seconds(self.config.refresh_buffer_secs.max(0))
                .unwrap_or(Duration::MAX);
            self.session.refresh_if_expiring(buffer).await?;
        }
        Ok(())
    }

    /// Build request headers with authentication.
    pub(crate) async fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let token = self.session.access_token().await;
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send::<()>(Method::GET, path, None).await?.json()
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::POST, path, Some(body)).await?.json()
    }

    /// Make a POST request whose success carries no payload.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<bool> {
        self.send::<()>(Method::POST, path, None).await?;
        Ok(true)
    }

    /// Issue one request and map the status code.
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Reply> {
        self.ensure_session_valid().await?;

        let url = self.base_url.join(path)?;
        let headers = self.build_headers().await?;

        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        Self::handle_response(response).await
    }

    async fn handle_response(response: reqwest::Response) -> Result<Reply> {
        let status = response.status();
        let body = response.bytes().await?;

        match status {
            StatusCode::OK | StatusCode::CREATED => Ok(Reply::Content(body.to_vec())),
            StatusCode::NO_CONTENT => Ok(Reply::NoContent),
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                match serde_json::from_slice::<ErrorBody>(&body) {
                    Ok(error_body) => Err(Error::Api {
                        status: status.as_u16(),
                        body: error_body,
                    }),
                    Err(_) => Err(Error::UnexpectedStatus {
                        status: status.as_u16(),
                        body: String::from_utf8_lossy(&body).into_owned(),
                    }),
                }
            }
            StatusCode::UNAUTHORIZED => Err(Error::Api {
                status: status.as_u16(),
                body: ErrorBody::unauthorized(),
            }),
            _ => {
                tracing::warn!(status = status.as_u16(), "unhandled response status");

                if status.is_success() {
                    return Ok(Reply::Content(body.to_vec()));
                }

                match serde_json::from_slice::<ErrorBody>(&body) {
                    Ok(error_body) if !error_body.errors.is_empty() => Err(Error::Api {
                        status: status.as_u16(),
                        body: error_body,
                    }),
                    _ => Err(Error::UnexpectedStatus {
                        status: status.as_u16(),
                        body: String::from_utf8_lossy(&body).into_owned(),
                    }),
                }
            }
        }
    }
}

/// Parse a base URL, making sure relative paths join below it.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl Clone for FibClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for FibClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FibClient")
            .field("environment", &self.inner.environment)
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish()
    }
}
