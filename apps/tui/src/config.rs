use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Runtime configuration, resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Resolves configuration from any key lookup, relative paths under `base_dir`
    pub fn from_lookup(base_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("F1_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let settings_path = base_dir.join(
            lookup("F1_SETTINGS_PATH").unwrap_or_else(|| "f1-dash-settings.json".to_string()),
        );
        let log_path =
            base_dir.join(lookup("F1_LOG_PATH").unwrap_or_else(|| "f1-dash.log".to_string()));

        let debug = lookup("DEBUG").is_some_and(|value| value != "0" && !value.is_empty());

        Self {
            api_url,
            settings_path,
            log_path,
            debug,
        }
    }
}

/// Initializes the application configuration from `.env` and the process environment
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir = env::current_dir()?;
    Ok(AppConfig::from_lookup(&base_dir, |key| env::var(key).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(Path::new("/srv/f1"), |_| None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(
            config.settings_path,
            PathBuf::from("/srv/f1/f1-dash-settings.json")
        );
        assert_eq!(config.log_path, PathBuf::from("/srv/f1/f1-dash.log"));
        assert!(!config.debug);
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars = HashMap::from([
            ("F1_API_URL", "https://f1.example.com/"),
            ("F1_SETTINGS_PATH", "/etc/f1/settings.json"),
            ("DEBUG", "1"),
        ]);
        let config = AppConfig::from_lookup(Path::new("/srv/f1"), |key| {
            vars.get(key).map(ToString::to_string)
        });

        assert_eq!(config.api_url, "https://f1.example.com");
        assert_eq!(config.settings_path, PathBuf::from("/etc/f1/settings.json"));
        assert!(config.debug);
    }
}
