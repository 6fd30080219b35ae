//! Login, logout, registration and the current user

use super::{ClientError, PendingRequest, SessionClient, bounded};
use crate::types::{CurrentUser, LoginRequest, RegisterRequest};
use serde_json::Value;
use tracing::{info, warn};

impl SessionClient {
    /// Log in with username and password
    ///
    /// Stores the issued token pair and requests navigation to the home
    /// location. On rejection the stored credentials are left untouched and
    /// the backend's message is available through
    /// [`ClientError::first_message`].
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let pair = bounded(
            self.inner.timeout,
            None,
            self.inner.public.obtain_token_pair(&request),
        )
        .await
        .inspect_err(|e| warn!(username, error = %e, "Login failed"))?;

        self.inner.credentials.store_pair(&pair).await?;
        info!(username, "Logged in");
        self.navigate_home();
        Ok(())
    }

    /// Forget the stored tokens and return to the login page
    pub async fn logout(&self) -> Result<(), ClientError> {
        info!("Logging out");
        self.end_session().await
    }

    /// Create a user account (no authentication needed)
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Value, ClientError> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        bounded(self.inner.timeout, None, self.inner.public.register(&request)).await
    }

    /// Get the logged-in user with their permission codes
    pub async fn current_user(&self) -> Result<CurrentUser, ClientError> {
        self.execute(PendingRequest::get("/api/users/me/")).await
    }
}
