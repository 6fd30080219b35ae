//! Shared fixtures for the session client integration tests

#![allow(dead_code)]

use lending_core::{ACCESS_TOKEN_KEY, MemoryStateStore, REFRESH_TOKEN_KEY, StateStore};
use lending_http::SessionClient;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Locations the session asked to navigate to, in order
#[derive(Clone, Default)]
pub struct Visits(Arc<Mutex<Vec<String>>>);

impl Visits {
    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct Fixture {
    pub client: SessionClient,
    pub state: Arc<MemoryStateStore>,
    pub visits: Visits,
}

impl Fixture {
    pub async fn access_token(&self) -> Option<String> {
        self.state.get(ACCESS_TOKEN_KEY).await.unwrap()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.state.get(REFRESH_TOKEN_KEY).await.unwrap()
    }
}

/// Client against `server` with the given tokens already stored
pub async fn fixture(server: &MockServer, access: Option<&str>, refresh: Option<&str>) -> Fixture {
    fixture_at(&server.uri(), access, refresh).await
}

/// Client against an arbitrary base URL with the given tokens already stored
pub async fn fixture_at(base_url: &str, access: Option<&str>, refresh: Option<&str>) -> Fixture {
    let state = Arc::new(MemoryStateStore::new());
    if let Some(access) = access {
        state.set(ACCESS_TOKEN_KEY, access).await.unwrap();
    }
    if let Some(refresh) = refresh {
        state.set(REFRESH_TOKEN_KEY, refresh).await.unwrap();
    }

    let visits = Visits::default();
    let recorded = visits.clone();
    let client = SessionClient::builder()
        .base_url(base_url)
        .state(state.clone())
        .navigator(Arc::new(move |location: &str| {
            recorded.0.lock().unwrap().push(location.to_string());
        }))
        .build()
        .unwrap();

    Fixture {
        client,
        state,
        visits,
    }
}

/// Base URL of a local port with nothing listening on it
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Refresh endpoint accepting `refresh` and issuing `access`
pub fn refresh_issuing(refresh: &str, access: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(json!({ "refresh": refresh })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": access })))
}

/// Refresh endpoint rejecting every token
pub fn refresh_rejected() -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Token is invalid or expired" })),
        )
}
