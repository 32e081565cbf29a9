use color_eyre::eyre::eyre;
use color_eyre::Result;
use f1_dashboard_core::model::{DirectoryEntry, Health, Profile, ProfileKind};
use f1_dashboard_core::orchestrator::{
    load_constructor_profile, load_dashboard, load_directory, load_driver_profile, load_health,
};
use f1_dashboard_core::plot;
use f1_dashboard_core::view::{dashboard_view, profile_view, screen, Screen, RACE_COLUMNS};
use f1_dashboard_core::{ChartSpec, Fetcher, Route, ViewHandle, ViewState};
use serde::Serialize;
use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessMode {
    Text,
    Json,
}

/// Loads a single route (or the health report) and prints it instead of drawing a UI.
///
/// A failed view is written out and then returned as an error so the process
/// exits non-zero.
pub async fn run_headless<F, W>(
    fetcher: &F,
    route: Route,
    health: bool,
    mode: HeadlessMode,
    out: &mut W,
) -> Result<()>
where
    F: Fetcher + ?Sized,
    W: Write,
{
    if health {
        let report = load_health(fetcher)
            .await
            .map_err(|e| eyre!("health check failed: {e}"))?;
        return match mode {
            HeadlessMode::Json => write_json(out, &report),
            HeadlessMode::Text => write_health(out, &report),
        };
    }

    info!(%route, "loading route headless");
    match route {
        Route::Home => {
            let state = settle(route, async {
                Ok::<_, Infallible>(load_dashboard(fetcher).await)
            })
            .await;
            emit(out, route, &state, |out, dashboard| {
                let view = dashboard_view(dashboard);
                match mode {
                    HeadlessMode::Json => write_json(out, &view),
                    HeadlessMode::Text => {
                        write_heading(out, "F1 Dashboard")?;
                        for card in &view.kpis {
                            writeln!(out, "{}: {}", card.label, card.value)?;
                        }
                        for chart in [&view.championship, &view.constructors]
                            .into_iter()
                            .flatten()
                        {
                            write_chart(out, chart.title, chart.spec)?;
                        }
                        writeln!(out, "\nRecent Races ({})", RACE_COLUMNS.join(" | "))?;
                        for row in &view.races {
                            writeln!(out, "- {}", row.join(" | "))?;
                        }
                        for notice in &view.notices {
                            writeln!(out, "! {notice}")?;
                        }
                        Ok(())
                    }
                }
            })
        }
        Route::Driver(id) => {
            let state = settle(route, load_driver_profile(fetcher, id)).await;
            emit(out, route, &state, |out, profile| {
                write_profile(out, profile, mode)
            })
        }
        Route::Constructor(id) => {
            let state = settle(route, load_constructor_profile(fetcher, id)).await;
            emit(out, route, &state, |out, profile| {
                write_profile(out, profile, mode)
            })
        }
        Route::Drivers | Route::Constructors | Route::Seasons => {
            let endpoint = route
                .directory()
                .ok_or_else(|| eyre!("{route} is not a directory"))?;
            let state = settle(route, load_directory(fetcher, endpoint)).await;
            emit(out, route, &state, |out, entries| match mode {
                HeadlessMode::Json => write_json(out, entries),
                HeadlessMode::Text => write_directory(out, route.label(), entries),
            })
        }
    }
}

// Runs one cycle to completion through the same state machine the UI uses
async fn settle<T, E, L>(route: Route, load: L) -> ViewState<T>
where
    T: Clone,
    E: Display,
    L: Future<Output = std::result::Result<T, E>>,
{
    let view = ViewHandle::new();
    view.begin(route.path()).run(load).await;
    view.snapshot()
}

fn emit<T, W, R>(out: &mut W, route: Route, state: &ViewState<T>, render: R) -> Result<()>
where
    W: Write,
    R: FnOnce(&mut W, &T) -> Result<()>,
{
    match screen(state) {
        Screen::Content(data) => render(out, data),
        Screen::Error(message) => {
            writeln!(out, "Error: {message}")?;
            Err(eyre!("{route} failed to load: {message}"))
        }
        Screen::Blank | Screen::Spinner => Err(eyre!("{route} never finished loading")),
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_heading<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    Ok(())
}

fn write_chart<W: Write>(out: &mut W, heading: &str, spec: &ChartSpec) -> Result<()> {
    writeln!(out, "\n{heading}")?;
    if let Some(title) = plot::title(spec) {
        writeln!(out, "  {title}")?;
    }
    for series in plot::series(spec) {
        let size = series.points.len().max(series.slices.len());
        writeln!(out, "  - {} ({size} values)", series.name)?;
    }
    Ok(())
}

fn write_profile<B, W>(out: &mut W, profile: &Profile<B>, mode: HeadlessMode) -> Result<()>
where
    B: ProfileKind,
    W: Write,
{
    let view = profile_view(profile);
    if mode == HeadlessMode::Json {
        return write_json(out, &view);
    }

    write_heading(out, &view.title)?;
    for (label, value) in view.details.iter().flatten() {
        writeln!(out, "{label}: {value}")?;
    }
    if let Some(stats) = &view.stats {
        writeln!(out)?;
        for card in stats {
            writeln!(out, "{}: {}", card.label, card.value)?;
        }
    }
    if let Some(spec) = view.chart {
        write_chart(out, "Chart", spec)?;
    }
    Ok(())
}

fn write_directory<W: Write>(out: &mut W, title: &str, entries: &[DirectoryEntry]) -> Result<()> {
    write_heading(out, title)?;
    for entry in entries {
        writeln!(out, "{:>6}  {}", entry.id, entry.name)?;
    }
    Ok(())
}

fn write_health<W: Write>(out: &mut W, health: &Health) -> Result<()> {
    writeln!(out, "API health: {}", if health.ok { "ok" } else { "degraded" })?;
    if let Some(dir) = &health.data_dir {
        writeln!(out, "Data dir: {dir}")?;
    }
    if let Some(error) = &health.error {
        writeln!(out, "Error: {error}")?;
    }
    if !health.datasets.is_empty() {
        writeln!(out, "Datasets:")?;
        for (name, rows) in &health.datasets {
            writeln!(out, "- {name}: {rows}")?;
        }
    }
    if !health.sample_years.is_empty() {
        let years: Vec<String> = health.sample_years.iter().map(ToString::to_string).collect();
        writeln!(out, "Sample years: {}", years.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run_headless, HeadlessMode};
    use f1_dashboard_core::fetch::testing::ScriptedFetcher;
    use f1_dashboard_core::{Endpoint, FetchError, Route};
    use serde_json::{json, Value};

    async fn render(fetcher: &ScriptedFetcher, route: Route, mode: HeadlessMode) -> (bool, String) {
        let mut out = Vec::new();
        let ok = run_headless(fetcher, route, false, mode, &mut out)
            .await
            .is_ok();
        (ok, String::from_utf8_lossy(&out).into_owned())
    }

    #[tokio::test]
    async fn dashboard_text_lists_kpis_races_and_notices() {
        let fetcher = ScriptedFetcher::default()
            .with(
                Endpoint::Kpi,
                Ok(json!({"total_races": 1125, "total_drivers": 861})),
            )
            .with(
                Endpoint::RecentRaces,
                Ok(json!([{
                    "year": 2024,
                    "race_name": "Abu Dhabi Grand Prix",
                    "winner": "Lando Norris",
                    "constructor": "McLaren"
                }])),
            );

        let (ok, text) = render(&fetcher, Route::Home, HeadlessMode::Text).await;

        assert!(ok);
        assert!(text.starts_with("F1 Dashboard\n============\n"));
        assert!(text.contains("Total Races: 1125"));
        assert!(text.contains("Total Constructors: 0"));
        assert!(text.contains("Most Wins (Driver): N/A"));
        assert!(text.contains("- 2024 | Abu Dhabi Grand Prix | Lando Norris | McLaren"));
        assert!(text.contains("! Championship Points unavailable (HTTP 404)"));
    }

    #[tokio::test]
    async fn driver_json_uses_profile_projection() -> Result<(), serde_json::Error> {
        let fetcher = ScriptedFetcher::default().with(
            Endpoint::DriverProfile(1),
            Ok(json!({
                "bio": {"forename": "Lewis", "surname": "Hamilton", "dob": "1985-01-07", "nationality": "British"},
                "stats": {"total_races": 356, "total_wins": 105, "total_podiums": 202, "total_poles": 104, "total_dnfs": 33},
                "chart_json": "not json"
            })),
        );

        let (ok, text) = render(&fetcher, Route::Driver(1), HeadlessMode::Json).await;
        let view: Value = serde_json::from_str(&text)?;

        assert!(ok);
        assert_eq!(view["title"], "Lewis Hamilton");
        assert_eq!(view["details"][0], json!(["DOB", "7 January 1985"]));
        assert_eq!(view["stats"][1], json!({"label": "Wins", "value": "105"}));
        assert_eq!(view["chart"], Value::Null);
        Ok(())
    }

    #[tokio::test]
    async fn failed_profile_is_reported_and_returned() {
        let fetcher = ScriptedFetcher::default().with(
            Endpoint::ConstructorProfile(9),
            Err(FetchError::HttpStatus(500)),
        );

        let (ok, text) = render(&fetcher, Route::Constructor(9), HeadlessMode::Text).await;

        assert!(!ok);
        assert_eq!(text, "Error: HTTP 500\n");
    }

    #[tokio::test]
    async fn directory_lists_entries_in_server_order() {
        let fetcher = ScriptedFetcher::default().with(
            Endpoint::SeasonsList,
            Ok(json!([{"id": 2024, "name": "2024"}, {"id": 2023, "name": "2023"}])),
        );

        let (ok, text) = render(&fetcher, Route::Seasons, HeadlessMode::Text).await;

        assert!(ok);
        assert_eq!(text, "Races\n=====\n  2024  2024\n  2023  2023\n");
    }

    #[tokio::test]
    async fn health_report_prints_dataset_counts() {
        let fetcher = ScriptedFetcher::default().with(
            Endpoint::Health,
            Ok(json!({
                "ok": true,
                "data_dir": "/data",
                "datasets": {"drivers": 861, "races": 1125},
                "sample_years": [1950, 1951, 1952]
            })),
        );
        let mut out = Vec::new();

        let result = run_headless(&fetcher, Route::Home, true, HeadlessMode::Text, &mut out).await;

        assert!(result.is_ok());
        assert_eq!(
            String::from_utf8_lossy(&out),
            "API health: ok\nData dir: /data\nDatasets:\n- drivers: 861\n- races: 1125\nSample years: 1950, 1951, 1952\n"
        );
    }
}
