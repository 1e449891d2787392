//! Display theme preference

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::PreferenceStore;

/// Key under which the theme is stored
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown values fall back to light
    pub fn from_stored(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current theme, light when nothing is stored
pub fn load_theme(store: &dyn PreferenceStore) -> Result<Theme> {
    Ok(store
        .get(THEME_KEY)?
        .map(|value| Theme::from_stored(&value))
        .unwrap_or_default())
}

/// Flip the stored theme and return the new one
pub fn toggle_theme(store: &dyn PreferenceStore) -> Result<Theme> {
    let next = load_theme(store)?.toggled();
    store.set(THEME_KEY, next.as_str())?;
    info!("Theme switched to {}", next);
    Ok(next)
}
