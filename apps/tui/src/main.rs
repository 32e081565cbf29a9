use clap::Parser;
use color_eyre::Result;
use f1_dashboard_tui::cli::CliArgs;
use f1_dashboard_tui::config::init_app_config;
use f1_dashboard_tui::event::{self, HeadlessMode};
use f1_dashboard_tui::{logging, terminal, App, FileSettings, HttpFetcher};
use std::rc::Rc;
use tokio::task::LocalSet;
use tracing::info;

// Fetch cycles are spawned onto a LocalSet, so one thread is all we need
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let headless = args.headless || args.json || args.health || !is_terminal();
    logging::init(
        config.debug,
        (!headless).then_some(config.log_path.as_path()),
    )?;
    info!(api_url = %config.api_url, headless, "starting f1-dash");

    let fetcher = HttpFetcher::new(&config.api_url);

    if headless {
        let mode = if args.json {
            HeadlessMode::Json
        } else {
            HeadlessMode::Text
        };
        let mut stdout = std::io::stdout().lock();
        return event::run_headless(&fetcher, args.start_route(), args.health, mode, &mut stdout)
            .await;
    }

    let settings = FileSettings::open(config.settings_path.clone());
    info!(path = %settings.path().display(), "settings loaded");
    let mut app = App::new(Rc::new(fetcher), Box::new(settings), args.start_route());

    let mut terminal = terminal::setup_terminal()?;
    let result = LocalSet::new()
        .run_until(event::run(&mut terminal, &mut app))
        .await;
    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
