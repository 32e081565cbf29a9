use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to persist setting {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Persistent key/value preferences injected into the front-ends
pub trait Settings {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Settings that live only as long as the process
#[derive(Debug, Default, Clone)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl Settings for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn load(settings: &dyn Settings) -> Self {
        settings
            .get(THEME_KEY)
            .as_deref()
            .and_then(Self::parse)
            .unwrap_or_default()
    }

    /// Flips the theme and persists it; a failed write still flips the theme
    pub fn toggle(&mut self, settings: &mut dyn Settings) {
        *self = self.toggled();
        if let Err(err) = settings.set(THEME_KEY, self.as_str()) {
            warn!(%err, "theme change not persisted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnly;

    impl Settings for ReadOnly {
        fn get(&self, _key: &str) -> Option<String> {
            Some("light".to_string())
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), SettingsError> {
            Err(SettingsError::Write {
                key: key.to_string(),
                reason: "read-only".to_string(),
            })
        }
    }

    #[test]
    fn theme_defaults_to_dark() {
        let settings = MemorySettings::default();
        assert_eq!(Theme::load(&settings), Theme::Dark);
    }

    #[test]
    fn toggle_persists_the_new_theme() {
        let mut settings = MemorySettings::default();
        let mut theme = Theme::load(&settings);

        theme.toggle(&mut settings);

        assert_eq!(theme, Theme::Light);
        assert_eq!(settings.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(Theme::load(&settings), Theme::Light);
    }

    #[test]
    fn unknown_stored_value_falls_back() {
        let mut settings = MemorySettings::default();
        settings.set(THEME_KEY, "solarized").ok();
        assert_eq!(Theme::load(&settings), Theme::Dark);
    }

    #[test]
    fn failed_write_still_toggles() {
        let mut settings = ReadOnly;
        let mut theme = Theme::load(&settings);
        assert_eq!(theme, Theme::Light);

        theme.toggle(&mut settings);

        assert_eq!(theme, Theme::Dark);
    }
}
