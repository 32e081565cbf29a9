use std::fmt;

/// A read-only backend resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Kpi,
    ChampionshipPoints,
    ConstructorWins,
    RecentRaces,
    DriversList,
    ConstructorsList,
    SeasonsList,
    DriverProfile(u32),
    ConstructorProfile(u32),
}

impl Endpoint {
    pub fn path(self) -> String {
        match self {
            Self::Health => "/api/health".to_string(),
            Self::Kpi => "/api/kpi".to_string(),
            Self::ChampionshipPoints => "/api/championship-points".to_string(),
            Self::ConstructorWins => "/api/constructor-wins".to_string(),
            Self::RecentRaces => "/api/recent-races".to_string(),
            Self::DriversList => "/api/drivers_list".to_string(),
            Self::ConstructorsList => "/api/constructors_list".to_string(),
            Self::SeasonsList => "/api/seasons_list".to_string(),
            Self::DriverProfile(id) => format!("/api/driver_profile/{id}"),
            Self::ConstructorProfile(id) => format!("/api/constructor_profile/{id}"),
        }
    }

    /// Joins the endpoint path onto a base URL, tolerating a trailing slash
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::Endpoint;

    #[test]
    fn profile_paths_carry_the_entity_id() {
        assert_eq!(Endpoint::DriverProfile(1).path(), "/api/driver_profile/1");
        assert_eq!(
            Endpoint::ConstructorProfile(131).path(),
            "/api/constructor_profile/131"
        );
    }

    #[test]
    fn url_joins_without_doubling_slashes() {
        assert_eq!(
            Endpoint::Kpi.url("http://localhost:5000/"),
            "http://localhost:5000/api/kpi"
        );
        assert_eq!(Endpoint::RecentRaces.url(""), "/api/recent-races");
    }
}
