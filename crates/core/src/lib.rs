//! Lending client core: configuration, persistent state and tracing

pub mod auth;
pub mod config;
pub mod errors;
pub mod state;
pub mod theme;
pub mod tracing;

#[cfg(any(test, feature = "tests"))]
pub mod tests;

pub use auth::{ACCESS_TOKEN_KEY, CredentialStore, REFRESH_TOKEN_KEY, TokenPair};
pub use config::{ClientConfig, StorageBackend, StorageConfig};
pub use errors::{Error, Result};
pub use state::{FileStateStore, MemoryStateStore, StateStore};
pub use theme::{Preferences, THEME_KEY, Theme};
