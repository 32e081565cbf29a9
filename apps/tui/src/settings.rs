use f1_dashboard_core::settings::{Settings, SettingsError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Settings persisted as a flat JSON object on disk
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSettings {
    /// Loads the file if present; a missing or unreadable file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring unreadable settings file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)
    }
}

impl Settings for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist().map_err(|err| SettingsError::Write {
            key: key.to_string(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::FileSettings;
    use f1_dashboard_core::settings::{Settings, THEME_KEY};
    use f1_dashboard_core::Theme;
    use std::fs;

    #[test]
    fn missing_file_starts_empty() -> Result<(), std::io::Error> {
        let dir = tempfile::tempdir()?;
        let settings = FileSettings::open(dir.path().join("settings.json"));
        assert_eq!(settings.get(THEME_KEY), None);
        Ok(())
    }

    #[test]
    fn values_survive_reopen() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = FileSettings::open(&path);
        let mut theme = Theme::load(&settings);
        theme.toggle(&mut settings);

        let reopened = FileSettings::open(&path);
        assert_eq!(Theme::load(&reopened), theme);
        assert!(fs::read_to_string(&path)?.contains("\"theme\": \"light\""));
        Ok(())
    }

    #[test]
    fn corrupt_file_is_ignored() -> Result<(), std::io::Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("settings.json");
        fs::write(&path, "{theme")?;

        let settings = FileSettings::open(&path);
        assert_eq!(settings.get(THEME_KEY), None);
        assert_eq!(settings.path(), path.as_path());
        Ok(())
    }

    #[test]
    fn unwritable_path_reports_an_error() -> Result<(), std::io::Error> {
        let dir = tempfile::tempdir()?;
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "")?;

        let mut settings = FileSettings::open(blocker.join("settings.json"));
        assert!(settings.set(THEME_KEY, "light").is_err());
        assert_eq!(settings.get(THEME_KEY).as_deref(), Some("light"));
        Ok(())
    }
}
