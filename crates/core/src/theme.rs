//! Theme preference, stored next to the credentials but unrelated to auth

use crate::{Result, StateStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` is the light theme
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }
}

/// User preferences persisted in the state store
#[derive(Clone)]
pub struct Preferences {
    state: Arc<dyn StateStore>,
}

impl Preferences {
    pub fn new(state: Arc<dyn StateStore>) -> Self {
        Self { state }
    }

    pub async fn theme(&self) -> Result<Theme> {
        let stored = self.state.get(THEME_KEY).await?;
        Ok(Theme::from_stored(stored.as_deref()))
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.state.set(THEME_KEY, theme.as_str()).await
    }

    /// Flip the stored theme and return the new value
    pub async fn toggle_theme(&self) -> Result<Theme> {
        let next = self.theme().await?.toggle();
        self.set_theme(next).await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStateStore;

    #[test]
    fn unknown_values_read_as_light() {
        assert_eq!(Theme::from_stored(None), Theme::Light);
        assert_eq!(Theme::from_stored(Some("solarized")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
    }

    #[tokio::test]
    async fn toggle_persists_plain_strings() {
        let state = Arc::new(MemoryStateStore::new());
        let prefs = Preferences::new(state.clone());

        assert_eq!(prefs.theme().await.unwrap(), Theme::Light);
        assert_eq!(prefs.toggle_theme().await.unwrap(), Theme::Dark);
        assert_eq!(state.get(THEME_KEY).await.unwrap().as_deref(), Some("dark"));

        assert_eq!(prefs.toggle_theme().await.unwrap(), Theme::Light);
        assert_eq!(state.get(THEME_KEY).await.unwrap().as_deref(), Some("light"));
    }
}
