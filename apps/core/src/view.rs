//! Pure projection from view state to what should be on screen.
//!
//! Front-ends only decide how to draw these; which sections exist, their
//! order and their fallback values are settled here.

use serde::Serialize;

use crate::chart::ChartSpec;
use crate::model::{Dashboard, Profile, ProfileKind, RaceRecord};
use crate::state::ViewState;

/// Top-level choice for a view
#[derive(Debug, PartialEq)]
pub enum Screen<'a, T> {
    /// No cycle has started yet
    Blank,
    Spinner,
    Error(&'a str),
    Content(&'a T),
}

pub fn screen<T>(state: &ViewState<T>) -> Screen<'_, T> {
    match state {
        ViewState::Idle => Screen::Blank,
        ViewState::Loading => Screen::Spinner,
        ViewState::Failed(message) => Screen::Error(message.as_str()),
        ViewState::Ready(data) => Screen::Content(data),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartCard<'a> {
    pub title: &'static str,
    pub spec: &'a ChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView<'a> {
    pub title: String,
    pub details: Option<Vec<(&'static str, String)>>,
    pub stats: Option<Vec<Card>>,
    pub chart: Option<&'a ChartSpec>,
}

pub fn profile_view<B: ProfileKind>(profile: &Profile<B>) -> ProfileView<'_> {
    ProfileView {
        title: profile.title(),
        details: profile.bio.as_ref().map(ProfileKind::details),
        stats: profile.stats.as_ref().map(|stats| {
            B::METRICS
                .iter()
                .map(|&metric| Card {
                    label: metric.label(),
                    value: stats.get(metric).to_string(),
                })
                .collect()
        }),
        chart: profile.chart.as_ref(),
    }
}

pub const CHAMPIONSHIP_CHART_TITLE: &str = "Championship Points Battle (2010-2020)";
pub const CONSTRUCTOR_CHART_TITLE: &str = "Top 5 Constructors (Wins)";

pub const RACE_COLUMNS: [&str; 4] = ["Year", "Race Name", "Winner (Driver)", "Constructor"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView<'a> {
    pub kpis: Vec<Card>,
    pub championship: Option<ChartCard<'a>>,
    pub constructors: Option<ChartCard<'a>>,
    pub races: Vec<[String; 4]>,
    pub notices: Vec<String>,
}

pub fn dashboard_view(dashboard: &Dashboard) -> DashboardView<'_> {
    let kpi = &dashboard.kpi;
    DashboardView {
        kpis: vec![
            Card {
                label: "Total Races",
                value: kpi.total_races().to_string(),
            },
            Card {
                label: "Total Drivers",
                value: kpi.total_drivers().to_string(),
            },
            Card {
                label: "Total Constructors",
                value: kpi.total_constructors().to_string(),
            },
            Card {
                label: "Most Wins (Driver)",
                value: kpi.most_wins_driver().to_string(),
            },
        ],
        championship: dashboard
            .championship_chart
            .as_ref()
            .map(|spec| ChartCard {
                title: CHAMPIONSHIP_CHART_TITLE,
                spec,
            }),
        constructors: dashboard.constructor_chart.as_ref().map(|spec| ChartCard {
            title: CONSTRUCTOR_CHART_TITLE,
            spec,
        }),
        races: dashboard.recent_races.iter().map(race_row).collect(),
        notices: dashboard
            .notices
            .iter()
            .map(|notice| format!("{} unavailable ({})", notice.section.label(), notice.message))
            .collect(),
    }
}

pub fn race_row(race: &RaceRecord) -> [String; 4] {
    [
        race.year.map(|year| year.to_string()).unwrap_or_default(),
        race.race_name.clone(),
        race.winner.clone(),
        race.constructor.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartSpec;
    use crate::model::{
        ConstructorBio, ConstructorProfile, DashboardSection, DriverBio, DriverProfile, Metric,
        ProfileStats, SectionNotice,
    };

    fn hamilton() -> DriverProfile {
        DriverProfile {
            bio: Some(DriverBio {
                forename: Some("Lewis".to_string()),
                surname: Some("Hamilton".to_string()),
                dob: Some("1985-01-07".to_string()),
                nationality: Some("British".to_string()),
            }),
            stats: Some(ProfileStats::from([
                (Metric::TotalRaces, 300),
                (Metric::TotalWins, 103),
                (Metric::TotalPodiums, 197),
                (Metric::TotalPoles, 104),
                (Metric::TotalDnfs, 20),
            ])),
            chart: ChartSpec::parse(Some(r#"{"data":[],"layout":{}}"#)),
        }
    }

    #[test]
    fn screen_follows_state() {
        assert_eq!(screen::<u8>(&ViewState::Idle), Screen::Blank);
        assert_eq!(screen::<u8>(&ViewState::Loading), Screen::Spinner);
        assert_eq!(
            screen::<u8>(&ViewState::Failed("HTTP 500".to_string())),
            Screen::Error("HTTP 500")
        );
        assert_eq!(screen(&ViewState::Ready(3_u8)), Screen::Content(&3));
    }

    #[test]
    fn driver_profile_renders_every_section() {
        let profile = hamilton();
        let view = profile_view(&profile);

        assert_eq!(view.title, "Lewis Hamilton");
        assert!(view.details.is_some());
        let values: Vec<_> = view
            .stats
            .unwrap_or_default()
            .into_iter()
            .map(|card| card.value)
            .collect();
        assert_eq!(values, ["300", "103", "197", "104", "20"]);
        assert!(view.chart.is_some_and(|chart| chart.data.is_empty() && chart.layout.is_empty()));
    }

    #[test]
    fn absent_sections_are_omitted() {
        let profile = DriverProfile {
            chart: None,
            bio: None,
            ..hamilton()
        };
        let view = profile_view(&profile);

        assert_eq!(view.title, "Driver");
        assert_eq!(view.details, None);
        assert!(view.stats.is_some());
        assert_eq!(view.chart, None);
    }

    #[test]
    fn constructor_profile_shows_two_cards() {
        let profile = ConstructorProfile {
            bio: Some(ConstructorBio {
                name: Some("Ferrari".to_string()),
                nationality: Some("Italian".to_string()),
            }),
            stats: Some(ProfileStats::default()),
            chart: None,
        };
        let view = profile_view(&profile);

        assert_eq!(
            view.stats,
            Some(vec![
                Card {
                    label: "Wins",
                    value: "0".to_string()
                },
                Card {
                    label: "Podiums",
                    value: "0".to_string()
                },
            ])
        );
        assert_eq!(
            view.details,
            Some(vec![("Nationality", "Italian".to_string())])
        );
    }

    #[test]
    fn degraded_dashboard_shows_defaults_and_notices() {
        let dashboard = Dashboard {
            recent_races: vec![RaceRecord {
                year: None,
                race_name: "Monaco Grand Prix".to_string(),
                winner: "Charles Leclerc".to_string(),
                constructor: "Ferrari".to_string(),
            }],
            notices: vec![SectionNotice {
                section: DashboardSection::Kpi,
                message: "HTTP 500".to_string(),
            }],
            ..Dashboard::default()
        };

        let view = dashboard_view(&dashboard);

        let values: Vec<_> = view.kpis.iter().map(|card| card.value.as_str()).collect();
        assert_eq!(values, ["0", "0", "0", "N/A"]);
        assert_eq!(view.championship, None);
        assert_eq!(
            view.races,
            vec![[
                String::new(),
                "Monaco Grand Prix".to_string(),
                "Charles Leclerc".to_string(),
                "Ferrari".to_string()
            ]]
        );
        assert_eq!(view.notices, ["KPIs unavailable (HTTP 500)"]);
    }

    #[test]
    fn dashboard_charts_carry_their_titles() {
        let chart = ChartSpec {
            data: vec![serde_json::json!({"type": "pie"})],
            layout: serde_json::Map::new(),
        };
        let dashboard = Dashboard {
            championship_chart: Some(chart.clone()),
            constructor_chart: Some(chart),
            ..Dashboard::default()
        };

        let view = dashboard_view(&dashboard);

        assert_eq!(
            view.championship.map(|card| card.title),
            Some(CHAMPIONSHIP_CHART_TITLE)
        );
        assert_eq!(
            view.constructors.map(|card| card.title),
            Some(CONSTRUCTOR_CHART_TITLE)
        );
    }
}
