use f1_dashboard_core::settings::{Settings, SettingsError};
use web_sys::Storage;

/// Settings kept in the browser's `localStorage`
pub struct LocalStorageSettings {
    storage: Option<Storage>,
}

impl LocalStorageSettings {
    /// Private browsing can deny storage; reads then fall back to defaults
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"localStorage unavailable, settings will not persist".into());
        }
        Self { storage }
    }
}

impl Settings for LocalStorageSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| SettingsError::Unavailable("localStorage".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|err| SettingsError::Write {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }
}

impl Default for LocalStorageSettings {
    fn default() -> Self {
        Self::new()
    }
}
