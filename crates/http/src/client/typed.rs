//! Client for the endpoints that take no bearer token

use super::ClientError;
use crate::types::{AccessTokenResponse, LoginRequest, RefreshRequest, RegisterRequest};
use lending_core::TokenPair;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;

/// Client for public endpoints that don't require authentication
#[derive(Clone, Debug)]
pub struct PublicClient {
    client: Client,
    base_url: String,
}

impl PublicClient {
    /// Create a new public client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_user_agent(base_url, None)
    }

    /// Create a new public client sending `user_agent` instead of the default
    pub fn with_user_agent(
        base_url: impl Into<String>,
        user_agent: Option<String>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| {
            ClientError::Configuration(format!("invalid base_url {base_url:?}: {e}"))
        })?;

        let user_agent = user_agent
            .unwrap_or_else(|| concat!("lending-client/", env!("CARGO_PKG_VERSION")).to_string());
        let client = ClientBuilder::new().user_agent(user_agent).build()?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL; absolute URLs pass through
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Exchange username and password for a token pair
    pub async fn obtain_token_pair(
        &self,
        request: &LoginRequest,
    ) -> Result<TokenPair, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/token/")
            .json(request);
        self.execute(req).await
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh_access_token(
        &self,
        refresh: &str,
    ) -> Result<AccessTokenResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/token/refresh/")
            .json(&RefreshRequest { refresh });
        self.execute(req).await
    }

    /// Create a new user account; field errors come back as `BadRequest`
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/users/register/")
            .json(request);
        self.execute(req).await
    }
}
