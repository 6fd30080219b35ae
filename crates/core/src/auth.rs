//! Persisted credential pair
//!
//! The access and refresh tokens live in the state store under two fixed
//! keys. Readers always go back to the store; nothing here caches a token.

use crate::{Result, StateStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Token pair as issued by the backend's login endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Access to the persisted credential pair
#[derive(Clone)]
pub struct CredentialStore {
    state: Arc<dyn StateStore>,
}

impl CredentialStore {
    pub fn new(state: Arc<dyn StateStore>) -> Self {
        Self { state }
    }

    pub async fn access_token(&self) -> Result<Option<String>> {
        self.state.get(ACCESS_TOKEN_KEY).await
    }

    pub async fn refresh_token(&self) -> Result<Option<String>> {
        self.state.get(REFRESH_TOKEN_KEY).await
    }

    pub async fn has_access_token(&self) -> Result<bool> {
        Ok(self.access_token().await?.is_some())
    }

    /// Persist a freshly issued pair, replacing any previous one
    pub async fn store_pair(&self, pair: &TokenPair) -> Result<()> {
        self.state.set(ACCESS_TOKEN_KEY, &pair.access).await?;
        self.state.set(REFRESH_TOKEN_KEY, &pair.refresh).await
    }

    pub async fn set_access_token(&self, token: &str) -> Result<()> {
        self.state.set(ACCESS_TOKEN_KEY, token).await
    }

    /// Remove both tokens
    ///
    /// Both removals are always attempted; the first failure is reported.
    pub async fn clear(&self) -> Result<()> {
        let access = self.state.remove(ACCESS_TOKEN_KEY).await;
        let refresh = self.state.remove(REFRESH_TOKEN_KEY).await;
        access.and(refresh)
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}
