use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::api::Endpoint;
use crate::chart::ChartSpec;

pub const NOT_AVAILABLE: &str = "N/A";

/// Headline numbers for the dashboard; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_races: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_drivers: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_constructors: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub most_wins_driver: Option<String>,
}

/// Reads non-negative whole numbers, including `1125.0` and `"1125"`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n < 1e15)
                .map(|n| n as u64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

impl KpiSummary {
    pub fn total_races(&self) -> u64 {
        self.total_races.unwrap_or(0)
    }

    pub fn total_drivers(&self) -> u64 {
        self.total_drivers.unwrap_or(0)
    }

    pub fn total_constructors(&self) -> u64 {
        self.total_constructors.unwrap_or(0)
    }

    pub fn most_wins_driver(&self) -> &str {
        self.most_wins_driver
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// One row of the recent results table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceRecord {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub race_name: String,
    #[serde(default)]
    pub winner: String,
    #[serde(default)]
    pub constructor: String,
}

/// Career counters keyed by metric name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileStats(BTreeMap<String, Value>);

impl ProfileStats {
    /// Missing keys and values that are not non-negative whole numbers read as zero
    pub fn get(&self, metric: Metric) -> u64 {
        self.0.get(metric.key()).and_then(count).unwrap_or(0)
    }
}

impl<const N: usize> From<[(Metric, u64); N]> for ProfileStats {
    fn from(entries: [(Metric, u64); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(metric, count)| (metric.key().to_string(), Value::from(count)))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TotalRaces,
    TotalWins,
    TotalPodiums,
    TotalPoles,
    TotalDnfs,
}

impl Metric {
    pub const fn key(self) -> &'static str {
        match self {
            Self::TotalRaces => "total_races",
            Self::TotalWins => "total_wins",
            Self::TotalPodiums => "total_podiums",
            Self::TotalPoles => "total_poles",
            Self::TotalDnfs => "total_dnfs",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalRaces => "Total Races",
            Self::TotalWins => "Wins",
            Self::TotalPodiums => "Podiums",
            Self::TotalPoles => "Poles",
            Self::TotalDnfs => "DNFs",
        }
    }
}

/// What distinguishes one kind of profile page from another
pub trait ProfileKind: Sized {
    /// Title used when the bio is missing
    const FALLBACK_TITLE: &'static str;
    /// Response field holding the nested chart document
    const CHART_FIELD: &'static str;
    /// Chart panel heading when the chart layout has no title
    const CHART_HEADING: &'static str;
    /// Stat cards, in display order
    const METRICS: &'static [Metric];

    fn endpoint(id: u32) -> Endpoint;
    fn title(&self) -> Option<String>;
    fn details(&self) -> Vec<(&'static str, String)>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverBio {
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub dob: Option<String>,
    pub nationality: Option<String>,
}

impl DriverBio {
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let dob = self.dob.as_deref()?;
        NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d").ok()
    }
}

impl ProfileKind for DriverBio {
    const FALLBACK_TITLE: &'static str = "Driver";
    const CHART_FIELD: &'static str = "chart_json";
    const CHART_HEADING: &'static str = "Championship Position by Year";
    const METRICS: &'static [Metric] = &[
        Metric::TotalRaces,
        Metric::TotalWins,
        Metric::TotalPodiums,
        Metric::TotalPoles,
        Metric::TotalDnfs,
    ];

    fn endpoint(id: u32) -> Endpoint {
        Endpoint::DriverProfile(id)
    }

    fn title(&self) -> Option<String> {
        let name = [self.forename.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!name.is_empty()).then_some(name)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let dob = self.birth_date().map_or_else(
            || self.dob.clone().unwrap_or_default(),
            |date| date.format("%-d %B %Y").to_string(),
        );
        vec![
            ("DOB", dob),
            ("Nationality", self.nationality.clone().unwrap_or_default()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorBio {
    pub name: Option<String>,
    pub nationality: Option<String>,
}

impl ProfileKind for ConstructorBio {
    const FALLBACK_TITLE: &'static str = "Team";
    const CHART_FIELD: &'static str = "pit_stop_chart_json";
    const CHART_HEADING: &'static str = "Avg. Pit Stop Duration by Season";
    const METRICS: &'static [Metric] = &[Metric::TotalWins, Metric::TotalPodiums];

    fn endpoint(id: u32) -> Endpoint {
        Endpoint::ConstructorProfile(id)
    }

    fn title(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![(
            "Nationality",
            self.nationality.clone().unwrap_or_default(),
        )]
    }
}

/// A merged profile page: each section is independently optional
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile<B> {
    pub bio: Option<B>,
    pub stats: Option<ProfileStats>,
    pub chart: Option<ChartSpec>,
}

impl<B: ProfileKind> Profile<B> {
    pub fn title(&self) -> String {
        self.bio
            .as_ref()
            .and_then(ProfileKind::title)
            .unwrap_or_else(|| B::FALLBACK_TITLE.to_string())
    }
}

pub type DriverProfile = Profile<DriverBio>;
pub type ConstructorProfile = Profile<ConstructorBio>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DashboardSection {
    Kpi,
    ChampionshipChart,
    ConstructorChart,
    RecentRaces,
}

impl DashboardSection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kpi => "KPIs",
            Self::ChampionshipChart => "Championship Points",
            Self::ConstructorChart => "Constructor Wins",
            Self::RecentRaces => "Recent Races",
        }
    }
}

/// A section of the dashboard whose fetch failed during the cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionNotice {
    pub section: DashboardSection,
    pub message: String,
}

/// Home page payload, merged from four independent fetches
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    pub kpi: KpiSummary,
    pub championship_chart: Option<ChartSpec>,
    pub constructor_chart: Option<ChartSpec>,
    pub recent_races: Vec<RaceRecord>,
    pub notices: Vec<SectionNotice>,
}

/// An `{id, name}` pair from one of the listing endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: u32,
    pub name: String,
}

/// Backend data availability report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Health {
    pub ok: bool,
    pub data_dir: Option<String>,
    pub datasets: BTreeMap<String, u64>,
    pub sample_years: Vec<i64>,
    pub error: Option<String>,
}
