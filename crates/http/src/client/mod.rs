//! Authenticated session client for the lending backend
//!
//! [`SessionClient::request`] attaches the stored access token, and on a 401
//! refreshes it once and replays the request. Callers never deal with token
//! expiry themselves; they either get the server's response, a
//! [`Outcome::LoggedOut`] once the session is unrecoverable, or an error when
//! the transport itself failed.

pub mod auth;
pub mod error;
pub mod inventory;
pub mod loans;
pub mod navigator;
pub mod reports;
pub mod request;
pub mod typed;

pub use error::ClientError;
pub use navigator::{LogNavigator, Navigator};
pub use request::{FormField, Outcome, PendingRequest, RequestBody};
pub use typed::PublicClient;

use bytes::Bytes;
use lending_core::{ClientConfig, CredentialStore, MemoryStateStore, Preferences, StateStore};
use reqwest::StatusCode;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Authenticated client
///
/// Cheap to clone; clones share the credential store and the refresh lock.
#[derive(Clone)]
pub struct SessionClient {
    inner: Arc<Inner>,
}

struct Inner {
    public: PublicClient,
    credentials: CredentialStore,
    preferences: Preferences,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    home_path: String,
    timeout: Option<Duration>,
    /// Serializes token refreshes; see [`SessionClient::refresh_after`]
    refresh_lock: Mutex<()>,
}

impl SessionClient {
    /// Create a client with in-memory state and default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> SessionClientBuilder {
        SessionClientBuilder::default()
    }

    /// Build a client from loaded configuration, opening its state store
    pub fn from_config(
        config: &ClientConfig,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        config
            .validate()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        let mut builder = Self::builder()
            .base_url(&config.base_url)
            .state(config.storage.open())
            .navigator(navigator)
            .login_path(&config.login_path)
            .home_path(&config.home_path)
            .user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.inner.public.base_url()
    }

    /// Client for the unauthenticated endpoints, sharing this connection pool
    pub fn public(&self) -> &PublicClient {
        &self.inner.public
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    pub fn preferences(&self) -> &Preferences {
        &self.inner.preferences
    }

    /// Issue an authenticated request, refreshing the token once on a 401
    ///
    /// A missing access token ends the call before anything is sent: the
    /// login navigation is requested and [`Outcome::LoggedOut`] returned.
    /// Every response other than a first 401 is returned as received,
    /// including a 401 on the retried attempt.
    ///
    /// # Errors
    ///
    /// Transport failures surface as [`ClientError::Request`] and are never
    /// retried. The call may also end with [`ClientError::Timeout`],
    /// [`ClientError::Cancelled`] or [`ClientError::Storage`].
    pub async fn request(&self, pending: PendingRequest) -> Result<Outcome, ClientError> {
        let timeout = pending.timeout.or(self.inner.timeout);
        let cancellation = pending.cancellation.clone();
        bounded(timeout, cancellation, self.send_with_refresh(&pending)).await
    }

    /// Exchange the stored refresh token for a new access token
    ///
    /// Returns `false` without any network call when no refresh token is
    /// stored. Any other failure clears both tokens before returning `false`.
    pub async fn refresh(&self) -> bool {
        let _guard = self.inner.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Whether an access token is currently stored
    pub async fn is_authenticated(&self) -> Result<bool, ClientError> {
        Ok(self.inner.credentials.has_access_token().await?)
    }

    async fn send_with_refresh(&self, pending: &PendingRequest) -> Result<Outcome, ClientError> {
        let Some(token) = self.inner.credentials.access_token().await? else {
            warn!(path = %pending.path, "No access token stored, redirecting to login");
            self.navigate_to_login();
            return Ok(Outcome::LoggedOut);
        };

        let response = self.send(pending, &token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(Outcome::Response(response));
        }

        debug!(method = %pending.method, path = %pending.path, "Access token rejected, refreshing");
        if !self.refresh_after(&token).await {
            warn!(path = %pending.path, "Token refresh failed, ending session");
            if let Err(e) = self.end_session().await {
                error!(error = %e, "Failed to clear credentials");
            }
            return Ok(Outcome::LoggedOut);
        }

        let Some(token) = self.inner.credentials.access_token().await? else {
            self.navigate_to_login();
            return Ok(Outcome::LoggedOut);
        };

        let response = self.send(pending, &token).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(path = %pending.path, "Request rejected again after token refresh");
        }
        Ok(Outcome::Response(response))
    }

    async fn send(
        &self,
        pending: &PendingRequest,
        token: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let mut builder = self
            .inner
            .public
            .request(pending.method.clone(), &pending.path)
            .bearer_auth(token);
        for (name, value) in &pending.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &pending.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.multipart(request::build_form(fields)?),
        };

        debug!(method = %pending.method, path = %pending.path, "Sending request");
        let response = builder.send().await.map_err(|e| {
            error!(method = %pending.method, path = %pending.path, error = %e, "Request failed");
            ClientError::Request(e)
        })?;
        debug!(status = %response.status(), path = %pending.path, "Received response");
        Ok(response)
    }

    /// Refresh on behalf of a request whose token `stale` was rejected
    ///
    /// Concurrent callers queue on the refresh lock. Whoever gets it first
    /// refreshes; the rest find a different token already stored and reuse
    /// it, or find the store empty because that refresh failed.
    async fn refresh_after(&self, stale: &str) -> bool {
        let _guard = self.inner.refresh_lock.lock().await;

        match self.inner.credentials.access_token().await {
            Ok(Some(current)) if current != stale => {
                debug!("Access token already refreshed by a concurrent request");
                true
            }
            Ok(Some(_)) => self.refresh_locked().await,
            Ok(None) => false,
            Err(e) => {
                error!(error = %e, "Failed to read access token");
                false
            }
        }
    }

    /// Caller must hold `refresh_lock`
    async fn refresh_locked(&self) -> bool {
        let credentials = &self.inner.credentials;

        let refresh = match credentials.refresh_token().await {
            Ok(Some(refresh)) => refresh,
            Ok(None) => {
                debug!("No refresh token stored");
                return false;
            }
            Err(e) => {
                error!(error = %e, "Failed to read refresh token");
                return false;
            }
        };

        match self.inner.public.refresh_access_token(&refresh).await {
            Ok(response) => match credentials.set_access_token(&response.access).await {
                Ok(()) => {
                    info!("Access token refreshed");
                    true
                }
                Err(e) => {
                    error!(error = %e, "Failed to store refreshed access token");
                    false
                }
            },
            Err(e) => {
                warn!(error = %e, "Token refresh rejected, clearing credentials");
                if let Err(e) = credentials.clear().await {
                    error!(error = %e, "Failed to clear credentials");
                }
                false
            }
        }
    }

    /// Clear credentials and send the user to the login page
    pub(crate) async fn end_session(&self) -> Result<(), ClientError> {
        let cleared = self.inner.credentials.clear().await;
        self.navigate_to_login();
        cleared.map_err(ClientError::from)
    }

    fn navigate_to_login(&self) {
        self.inner.navigator.navigate(&self.inner.login_path);
    }

    fn navigate_home(&self) {
        self.inner.navigator.navigate(&self.inner.home_path);
    }
}

impl SessionClient {
    /// Execute a request and decode a JSON success body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        pending: PendingRequest,
    ) -> Result<T, ClientError> {
        let body = self.checked(pending).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a request whose success carries no body of interest
    pub async fn execute_empty(&self, pending: PendingRequest) -> Result<(), ClientError> {
        self.checked(pending).await?;
        Ok(())
    }

    /// Execute a request and return the raw success body
    pub async fn execute_bytes(&self, pending: PendingRequest) -> Result<Bytes, ClientError> {
        Ok(self.checked(pending).await?.bytes().await?)
    }

    /// Map an outcome onto the error taxonomy
    ///
    /// A 401 that survived the retry ends the session before it is reported.
    async fn checked(&self, pending: PendingRequest) -> Result<reqwest::Response, ClientError> {
        let response = match self.request(pending).await? {
            Outcome::LoggedOut => return Err(ClientError::SessionExpired),
            Outcome::Response(response) => response,
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.end_session().await {
                error!(error = %e, "Failed to clear credentials");
            }
        }
        Err(ClientError::from_status(status, message))
    }
}

/// Apply the deadline and cancellation token to a whole logical call
pub(crate) async fn bounded<T, F>(
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
    call: F,
) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    let timed = async {
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(?limit, "Request timed out");
                    Err(ClientError::Timeout(limit))
                }
            },
            None => call.await,
        }
    };

    match cancellation {
        Some(token) => tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("Request cancelled by caller");
                Err(ClientError::Cancelled)
            }
            result = timed => result,
        },
        None => timed.await,
    }
}

/// Builder for SessionClient
#[derive(Default)]
pub struct SessionClientBuilder {
    base_url: Option<String>,
    state: Option<Arc<dyn StateStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    login_path: Option<String>,
    home_path: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SessionClientBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the store holding tokens and preferences
    #[must_use]
    pub fn state(mut self, state: Arc<dyn StateStore>) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the hook that performs login/home navigation
    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = Some(path.into());
        self
    }

    /// Set the default timeout for a whole logical call
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SessionClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        let public = PublicClient::with_user_agent(base_url, self.user_agent)?;
        let state = self
            .state
            .unwrap_or_else(|| Arc::new(MemoryStateStore::new()));

        Ok(SessionClient {
            inner: Arc::new(Inner {
                public,
                credentials: CredentialStore::new(state.clone()),
                preferences: Preferences::new(state),
                navigator: self.navigator.unwrap_or_else(|| Arc::new(LogNavigator)),
                login_path: self.login_path.unwrap_or_else(|| "/login".to_string()),
                home_path: self.home_path.unwrap_or_else(|| "/dashboard".to_string()),
                timeout: self.timeout,
                refresh_lock: Mutex::new(()),
            }),
        })
    }
}
