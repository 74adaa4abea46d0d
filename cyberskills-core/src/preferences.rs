//! Theme preference persisted alongside the chat history

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::KeyValueStore;

/// Default storage key for the theme preference
pub const THEME_KEY: &str = "theme";

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes the theme under a fixed key
#[derive(Debug, Clone)]
pub struct ThemePreference {
    key: String,
}

impl ThemePreference {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Stored theme; anything but `"dark"` (or a read failure) means light
    pub fn load(&self, store: &dyn KeyValueStore) -> Theme {
        match store.get(&self.key) {
            Ok(Some(value)) if value == Theme::Dark.as_str() => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Flip the stored theme and return the new one
    pub fn toggle(&self, store: &dyn KeyValueStore) -> crate::Result<Theme> {
        let theme = self.load(store).toggled();
        store.set(&self.key, theme.as_str())?;
        Ok(theme)
    }
}

impl Default for ThemePreference {
    fn default() -> Self {
        Self::new(THEME_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_default_is_light() {
        let store = MemoryStore::new();
        assert_eq!(ThemePreference::default().load(&store), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let store = MemoryStore::new();
        let pref = ThemePreference::default();

        assert_eq!(pref.toggle(&store).unwrap(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(pref.load(&store), Theme::Dark);

        assert_eq!(pref.toggle(&store).unwrap(), Theme::Light);
        assert_eq!(pref.load(&store), Theme::Light);
    }

    #[test]
    fn test_unknown_value_is_light() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(ThemePreference::default().load(&store), Theme::Light);
    }
}
