//! Loaders that turn one or more fetches into a single render-ready payload.
//!
//! Profile and directory views are all-or-nothing: their only fetch failing
//! fails the view. The dashboard is best-effort: its four fetches run
//! concurrently, each failure degrades only its own section and is recorded
//! as a [`SectionNotice`], and the merged payload is returned once every
//! fetch has settled.

use futures::join;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::api::Endpoint;
use crate::chart::ChartSpec;
use crate::error::FetchError;
use crate::fetch::{fetch_as, Fetcher};
use crate::model::{
    ConstructorBio, ConstructorProfile, Dashboard, DashboardSection, DirectoryEntry, DriverBio,
    DriverProfile, Health, KpiSummary, Profile, ProfileKind, ProfileStats, RaceRecord,
    SectionNotice,
};

pub async fn load_profile<B, F>(fetcher: &F, id: u32) -> Result<Profile<B>, FetchError>
where
    B: ProfileKind + DeserializeOwned,
    F: Fetcher + ?Sized,
{
    let body = fetcher.fetch(B::endpoint(id)).await?;
    if !body.is_object() {
        return Err(FetchError::Decode("expected a JSON object".to_string()));
    }

    Ok(Profile {
        bio: optional_section(&body, "bio"),
        stats: optional_section::<ProfileStats>(&body, "stats"),
        chart: ChartSpec::from_field(&body, B::CHART_FIELD),
    })
}

pub async fn load_driver_profile<F>(fetcher: &F, id: u32) -> Result<DriverProfile, FetchError>
where
    F: Fetcher + ?Sized,
{
    load_profile::<DriverBio, F>(fetcher, id).await
}

pub async fn load_constructor_profile<F>(
    fetcher: &F,
    id: u32,
) -> Result<ConstructorProfile, FetchError>
where
    F: Fetcher + ?Sized,
{
    load_profile::<ConstructorBio, F>(fetcher, id).await
}

fn optional_section<T: DeserializeOwned>(body: &Value, field: &str) -> Option<T> {
    match body.get(field)? {
        Value::Null => None,
        value => serde_json::from_value(value.clone())
            .map_err(|err| warn!(field, %err, "ignoring malformed profile section"))
            .ok(),
    }
}

pub async fn load_dashboard<F>(fetcher: &F) -> Dashboard
where
    F: Fetcher + ?Sized,
{
    let (kpi, championship, constructors, races) = join!(
        fetch_as::<KpiSummary, F>(fetcher, Endpoint::Kpi),
        fetcher.fetch(Endpoint::ChampionshipPoints),
        fetcher.fetch(Endpoint::ConstructorWins),
        fetcher.fetch(Endpoint::RecentRaces),
    );

    let mut dashboard = Dashboard::default();

    match kpi {
        Ok(kpi) => dashboard.kpi = kpi,
        Err(err) => note(&mut dashboard, DashboardSection::Kpi, &err),
    }

    match championship {
        Ok(value) => dashboard.championship_chart = ChartSpec::from_value(value),
        Err(err) => note(&mut dashboard, DashboardSection::ChampionshipChart, &err),
    }

    match constructors {
        Ok(value) => dashboard.constructor_chart = ChartSpec::from_value(value),
        Err(err) => note(&mut dashboard, DashboardSection::ConstructorChart, &err),
    }

    match races.and_then(race_rows) {
        Ok(rows) => dashboard.recent_races = rows,
        Err(err) => note(&mut dashboard, DashboardSection::RecentRaces, &err),
    }

    dashboard
}

fn note(dashboard: &mut Dashboard, section: DashboardSection, err: &FetchError) {
    warn!(section = section.label(), %err, "dashboard section unavailable");
    dashboard.notices.push(SectionNotice {
        section,
        message: err.to_string(),
    });
}

fn race_rows(value: Value) -> Result<Vec<RaceRecord>, FetchError> {
    let Value::Array(rows) = value else {
        return Err(FetchError::Decode("expected a list of races".to_string()));
    };

    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            serde_json::from_value(row)
                .map_err(|err| warn!(index, %err, "skipping malformed race row"))
                .ok()
        })
        .collect())
}

/// Loads one of the `{id, name}` listings
pub async fn load_directory<F>(
    fetcher: &F,
    endpoint: Endpoint,
) -> Result<Vec<DirectoryEntry>, FetchError>
where
    F: Fetcher + ?Sized,
{
    fetch_as(fetcher, endpoint).await
}

pub async fn load_health<F>(fetcher: &F) -> Result<Health, FetchError>
where
    F: Fetcher + ?Sized,
{
    fetch_as(fetcher, Endpoint::Health).await
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use serde_json::{json, Value};
    use tokio::task::yield_now;

    use super::*;
    use crate::fetch::testing::{GatedFetcher, ScriptedFetcher};
    use crate::model::Metric;
    use crate::state::{Commit, ViewHandle, ViewState};

    fn hamilton() -> Value {
        json!({
            "bio": {
                "forename": "Lewis",
                "surname": "Hamilton",
                "dob": "1985-01-07",
                "nationality": "British"
            },
            "stats": {
                "total_races": 300,
                "total_wins": 103,
                "total_podiums": 197,
                "total_poles": 104,
                "total_dnfs": 20
            },
            "chart_json": "{\"data\":[],\"layout\":{}}"
        })
    }

    fn verstappen() -> Value {
        json!({
            "bio": {"forename": "Max", "surname": "Verstappen"},
            "stats": {"total_wins": 63},
            "chart_json": null
        })
    }

    fn chart() -> Value {
        json!({"data": [{"type": "pie", "labels": ["Ferrari"], "values": [243]}], "layout": {}})
    }

    fn races() -> Value {
        json!([
            {"year": 2024, "race_name": "Abu Dhabi Grand Prix", "winner": "Lando Norris", "constructor": "McLaren"},
            {"year": 2024, "race_name": "Qatar Grand Prix", "winner": "Max Verstappen", "constructor": "Red Bull"}
        ])
    }

    #[tokio::test]
    async fn driver_profile_merges_bio_stats_and_chart() -> Result<(), FetchError> {
        let fetcher = ScriptedFetcher::default().with(Endpoint::DriverProfile(1), Ok(hamilton()));

        let profile = load_driver_profile(&fetcher, 1).await?;

        assert_eq!(profile.title(), "Lewis Hamilton");
        let stats = profile.stats.unwrap_or_default();
        assert_eq!(stats.get(Metric::TotalRaces), 300);
        assert_eq!(stats.get(Metric::TotalDnfs), 20);
        assert_eq!(profile.chart.map(|chart| chart.data.len()), Some(0));
        assert_eq!(fetcher.calls.borrow().as_slice(), &[Endpoint::DriverProfile(1)]);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_chart_only_drops_the_chart() -> Result<(), FetchError> {
        let mut body = hamilton();
        body["chart_json"] = json!("not json");
        let fetcher = ScriptedFetcher::default().with(Endpoint::DriverProfile(1), Ok(body));

        let profile = load_driver_profile(&fetcher, 1).await?;

        assert!(profile.bio.is_some());
        assert!(profile.stats.is_some());
        assert_eq!(profile.chart, None);
        Ok(())
    }

    #[tokio::test]
    async fn missing_sections_are_absent_not_errors() -> Result<(), FetchError> {
        let fetcher = ScriptedFetcher::default().with(
            Endpoint::ConstructorProfile(6),
            Ok(json!({"stats": {"total_wins": 243}, "bio": "garbage"})),
        );

        let profile = load_constructor_profile(&fetcher, 6).await?;

        assert_eq!(profile.bio, None);
        assert_eq!(profile.chart, None);
        assert_eq!(profile.title(), "Team");
        assert_eq!(
            profile.stats.map(|stats| stats.get(Metric::TotalWins)),
            Some(243)
        );
        Ok(())
    }

    #[tokio::test]
    async fn constructor_chart_comes_from_pit_stop_field() -> Result<(), FetchError> {
        let fetcher = ScriptedFetcher::default().with(
            Endpoint::ConstructorProfile(131),
            Ok(json!({
                "bio": {"name": "Mercedes", "nationality": "German"},
                "stats": {"total_wins": 125, "total_podiums": 290},
                "chart_json": "{\"data\":[],\"layout\":{}}",
                "pit_stop_chart_json": "{\"data\":[{\"type\":\"bar\"}],\"layout\":{}}"
            })),
        );

        let profile = load_constructor_profile(&fetcher, 131).await?;

        assert_eq!(profile.title(), "Mercedes");
        assert_eq!(profile.chart.map(|chart| chart.data.len()), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn non_object_profile_is_a_decode_error() {
        let fetcher = ScriptedFetcher::default().with(Endpoint::DriverProfile(1), Ok(json!([1])));
        let result = load_driver_profile(&fetcher, 1).await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn server_error_fails_the_profile_view() {
        let fetcher = ScriptedFetcher::default()
            .with(Endpoint::DriverProfile(1), Err(FetchError::HttpStatus(500)));
        let view = ViewHandle::new();

        let commit = view
            .begin("1")
            .run(load_driver_profile(&fetcher, 1))
            .await;

        assert_eq!(commit, Commit::Failed);
        let message = view.state().error().map(ToString::to_string);
        assert!(message.is_some_and(|message| message.contains("500")));
    }

    #[tokio::test]
    async fn dashboard_merges_all_four_fetches() {
        let fetcher = ScriptedFetcher::default()
            .with(
                Endpoint::Kpi,
                Ok(json!({
                    "total_races": 1125,
                    "total_drivers": 861,
                    "total_constructors": 212,
                    "most_wins_driver": "L. Hamilton (105)"
                })),
            )
            .with(Endpoint::ChampionshipPoints, Ok(chart()))
            .with(Endpoint::ConstructorWins, Ok(chart()))
            .with(Endpoint::RecentRaces, Ok(races()));

        let dashboard = load_dashboard(&fetcher).await;

        assert_eq!(dashboard.kpi.total_races(), 1125);
        assert_eq!(dashboard.kpi.most_wins_driver(), "L. Hamilton (105)");
        assert!(dashboard.championship_chart.is_some());
        assert!(dashboard.constructor_chart.is_some());
        assert_eq!(dashboard.recent_races.len(), 2);
        assert!(dashboard.notices.is_empty());
        assert_eq!(fetcher.calls.borrow().len(), 4);
    }

    #[tokio::test]
    async fn kpi_failure_degrades_only_the_kpi_cards() {
        let fetcher = ScriptedFetcher::default()
            .with(Endpoint::Kpi, Err(FetchError::HttpStatus(500)))
            .with(Endpoint::ChampionshipPoints, Ok(chart()))
            .with(Endpoint::ConstructorWins, Ok(json!({"error": "no wins"})))
            .with(Endpoint::RecentRaces, Ok(races()));

        let dashboard = load_dashboard(&fetcher).await;

        assert_eq!(dashboard.kpi, KpiSummary::default());
        assert_eq!(dashboard.kpi.most_wins_driver(), "N/A");
        assert!(dashboard.championship_chart.is_some());
        assert_eq!(dashboard.constructor_chart, None);
        assert_eq!(dashboard.recent_races[0].winner, "Lando Norris");
        assert_eq!(
            dashboard.notices,
            vec![SectionNotice {
                section: DashboardSection::Kpi,
                message: "HTTP 500".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn dashboard_with_every_fetch_failing_is_still_ready() {
        let fetcher = ScriptedFetcher::default();
        let view = ViewHandle::new();

        let commit = view
            .begin("home")
            .run(async { Ok::<_, Infallible>(load_dashboard(&fetcher).await) })
            .await;

        assert_eq!(commit, Commit::Ready);
        let state = view.state();
        let dashboard = state.ready();
        assert_eq!(dashboard.map(|dashboard| dashboard.notices.len()), Some(4));
        assert_eq!(
            dashboard.map(|dashboard| dashboard.recent_races.is_empty()),
            Some(true)
        );
    }

    #[tokio::test]
    async fn malformed_race_rows_are_skipped() {
        let fetcher = ScriptedFetcher::default().with(
            Endpoint::RecentRaces,
            Ok(json!([
                {"year": 2024, "race_name": "Las Vegas Grand Prix", "winner": "George Russell", "constructor": "Mercedes"},
                {"year": "soon", "race_name": 4}
            ])),
        );

        let dashboard = load_dashboard(&fetcher).await;

        assert_eq!(dashboard.recent_races.len(), 1);
        assert!(dashboard
            .notices
            .iter()
            .all(|notice| notice.section != DashboardSection::RecentRaces));
    }

    #[tokio::test]
    async fn dashboard_stays_loading_until_every_fetch_settles() {
        let fetcher = GatedFetcher::default();
        let kpi = fetcher.gate(Endpoint::Kpi);
        let championship = fetcher.gate(Endpoint::ChampionshipPoints);
        let constructors = fetcher.gate(Endpoint::ConstructorWins);
        let recent = fetcher.gate(Endpoint::RecentRaces);
        let view = ViewHandle::new();
        let cycle = view.begin("home");

        let release = async {
            kpi.send(Ok(json!({"total_races": 10}))).ok();
            championship.send(Ok(chart())).ok();
            constructors.send(Err(FetchError::network("reset"))).ok();
            for _ in 0..8 {
                yield_now().await;
            }
            let loading_with_three_of_four = view.state().is_loading();
            recent.send(Ok(races())).ok();
            loading_with_three_of_four
        };

        let (commit, was_loading) = tokio::join!(
            cycle.run(async { Ok::<_, Infallible>(load_dashboard(&fetcher).await) }),
            release
        );

        assert!(was_loading);
        assert_eq!(commit, Commit::Ready);
        let state = view.state();
        let dashboard = state.ready();
        assert_eq!(dashboard.map(|dashboard| dashboard.kpi.total_races()), Some(10));
        assert_eq!(dashboard.map(|dashboard| dashboard.recent_races.len()), Some(2));
    }

    #[tokio::test]
    async fn late_result_for_previous_driver_is_discarded() {
        let fetcher = GatedFetcher::default();
        let first = fetcher.gate(Endpoint::DriverProfile(1));
        let second = fetcher.gate(Endpoint::DriverProfile(33));
        let view = ViewHandle::new();

        let cycle_a = view.begin("1");
        let cycle_b = view.begin("33");

        let release = async {
            second.send(Ok(verstappen())).ok();
            for _ in 0..8 {
                yield_now().await;
            }
            first.send(Ok(hamilton())).ok();
        };

        let (commit_a, commit_b, ()) = tokio::join!(
            cycle_a.run(load_driver_profile(&fetcher, 1)),
            cycle_b.run(load_driver_profile(&fetcher, 33)),
            release
        );

        assert_eq!(commit_a, Commit::Superseded);
        assert_eq!(commit_b, Commit::Ready);
        let title = match &*view.state() {
            ViewState::Ready(profile) => Some(profile.title()),
            _ => None,
        };
        assert_eq!(title.as_deref(), Some("Max Verstappen"));
    }

    #[tokio::test]
    async fn directory_and_health_decode() -> Result<(), FetchError> {
        let fetcher = ScriptedFetcher::default()
            .with(
                Endpoint::DriversList,
                Ok(json!([{"id": 1, "name": "Lewis Hamilton"}, {"id": 830, "name": "Max Verstappen"}])),
            )
            .with(
                Endpoint::Health,
                Ok(json!({"ok": true, "datasets": {"races": 1125}, "sample_years": [1950, 1951]})),
            );

        let drivers = load_directory(&fetcher, Endpoint::DriversList).await?;
        let health = load_health(&fetcher).await?;

        assert_eq!(drivers[1].id, 830);
        assert!(health.ok);
        assert_eq!(health.datasets.get("races"), Some(&1125));
        Ok(())
    }
}
