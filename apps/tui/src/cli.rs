use clap::{CommandFactory, Parser};
use f1_dashboard_core::Route;

#[derive(Debug, Parser)]
#[command(name = "f1-dash", version, about = "Formula 1 statistics dashboard")]
pub struct CliArgs {
    /// Print the requested view and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Check backend data availability and exit
    #[arg(long)]
    pub health: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Open a driver profile
    #[arg(long, value_name = "ID", conflicts_with = "constructor")]
    pub driver: Option<u32>,

    /// Open a constructor profile
    #[arg(long, value_name = "ID")]
    pub constructor: Option<u32>,

    /// Override the backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the settings file path
    #[arg(long, value_name = "PATH")]
    pub settings: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("F1_API_URL", url);
        }
        if let Some(path) = &self.settings {
            std::env::set_var("F1_SETTINGS_PATH", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Route to open first
    pub const fn start_route(&self) -> Route {
        match (self.driver, self.constructor) {
            (Some(id), _) => Route::Driver(id),
            (None, Some(id)) => Route::Constructor(id),
            (None, None) => Route::Home,
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;
    use f1_dashboard_core::Route;

    #[test]
    fn start_route_defaults_to_home() {
        let args = CliArgs::parse_from(["f1-dash"]);
        assert_eq!(args.start_route(), Route::Home);
    }

    #[test]
    fn profile_flags_pick_the_start_route() {
        let args = CliArgs::parse_from(["f1-dash", "--headless", "--driver", "1"]);
        assert!(args.headless);
        assert_eq!(args.start_route(), Route::Driver(1));

        let args = CliArgs::parse_from(["f1-dash", "--constructor", "131", "--json"]);
        assert_eq!(args.start_route(), Route::Constructor(131));
    }

    #[test]
    fn driver_and_constructor_conflict() {
        let result = CliArgs::try_parse_from(["f1-dash", "--driver", "1", "--constructor", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn help_mentions_headless() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}
