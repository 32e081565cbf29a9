// UI module for f1-dash
// Handles all rendering; the app state is only read here

pub mod screens;
pub mod theme;
pub mod widgets;

use crate::app::App;
use f1_dashboard_core::view::dashboard_view;
use f1_dashboard_core::Route;
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::widgets::Block;
use ratatui::Frame;
use theme::Palette;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let palette = Palette::for_theme(app.theme);
    f.render_widget(Block::default().style(palette.base()), f.area());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Navbar
            Constraint::Min(5),    // Page
            Constraint::Length(2), // Footer
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    widgets::navbar::render_navbar(app, f, layout[0], &palette);

    match app.route() {
        Route::Home => screens::dashboard::render_dashboard(app, f, layout[1], &palette),
        Route::Driver(_) => {
            screens::profile::render_profile(app, f, layout[1], &app.driver.state(), &palette);
        }
        Route::Constructor(_) => {
            screens::profile::render_profile(
                app,
                f,
                layout[1],
                &app.constructor.state(),
                &palette,
            );
        }
        Route::Drivers | Route::Constructors | Route::Seasons => {
            screens::directory::render_directory(app, f, layout[1], &palette);
        }
    }

    let notices = if app.route() == Route::Home {
        app.dashboard
            .state()
            .ready()
            .map(|dashboard| dashboard_view(dashboard).notices)
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    widgets::status::render_footer(app, f, layout[2], &notices, &palette);

    if app.show_help {
        screens::help::render_help_popup(f, &palette);
    }
}

#[cfg(test)]
mod tests {
    use super::ui;
    use crate::app::App;
    use f1_dashboard_core::fetch::testing::ScriptedFetcher;
    use f1_dashboard_core::settings::MemorySettings;
    use f1_dashboard_core::{Endpoint, Navigator, Route};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;
    use std::rc::Rc;
    use tokio::task::{yield_now, LocalSet};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn profile_page_shows_title_cards_and_status() -> color_eyre::Result<()> {
        let fetcher = Rc::new(ScriptedFetcher::default().with(
            Endpoint::ConstructorProfile(131),
            Ok(json!({
                "bio": {"name": "Mercedes", "nationality": "German"},
                "stats": {"total_wins": 125, "total_podiums": 289},
                "pit_stop_chart_json": "{broken"
            })),
        ));

        LocalSet::new()
            .run_until(async {
                let mut app = App::new(
                    fetcher,
                    Box::new(MemorySettings::default()),
                    Route::Home,
                );
                app.navigate(Route::Constructor(131));
                for _ in 0..4 {
                    yield_now().await;
                }

                let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
                terminal.draw(|f| ui(&app, f))?;
                let text = screen_text(&terminal);

                assert!(text.contains("Mercedes"));
                assert!(text.contains("Nationality: German"));
                assert!(text.contains("Wins"));
                assert!(text.contains("125"));
                assert!(text.contains("289"));
                assert!(!text.contains("Pit Stop"));
                Ok::<(), color_eyre::Report>(())
            })
            .await
    }

    #[tokio::test]
    async fn failed_dashboard_sections_show_in_footer() -> color_eyre::Result<()> {
        let fetcher = Rc::new(
            ScriptedFetcher::default().with(Endpoint::Kpi, Ok(json!({"total_races": 1125}))),
        );

        LocalSet::new()
            .run_until(async {
                let mut app = App::new(fetcher, Box::new(MemorySettings::default()), Route::Home);
                app.sync();
                for _ in 0..4 {
                    yield_now().await;
                }

                let mut terminal = Terminal::new(TestBackend::new(120, 40))?;
                terminal.draw(|f| ui(&app, f))?;
                let text = screen_text(&terminal);

                assert!(text.contains("1125"));
                assert!(text.contains("Chart unavailable"));
                assert!(text.contains("Championship Points unavailable (HTTP 404) (+2 more)"));
                Ok::<(), color_eyre::Report>(())
            })
            .await
    }
}
