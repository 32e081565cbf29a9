use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::api::Endpoint;

/// A screen the dashboard can show, addressed by path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Drivers,
    Constructors,
    Seasons,
    Driver(u32),
    Constructor(u32),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown route: {0}")]
pub struct RouteError(String);

impl Route {
    /// Navbar entries, in display order
    pub const NAVBAR: [Self; 4] = [Self::Home, Self::Drivers, Self::Constructors, Self::Seasons];

    pub fn path(self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Drivers => "/drivers".to_string(),
            Self::Constructors => "/constructors".to_string(),
            Self::Seasons => "/seasons".to_string(),
            Self::Driver(id) => format!("/driver/{id}"),
            Self::Constructor(id) => format!("/constructor/{id}"),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Drivers | Self::Driver(_) => "Drivers",
            Self::Constructors | Self::Constructor(_) => "Constructors",
            Self::Seasons => "Races",
        }
    }

    /// Listing endpoint for directory routes
    pub const fn directory(self) -> Option<Endpoint> {
        match self {
            Self::Drivers => Some(Endpoint::DriversList),
            Self::Constructors => Some(Endpoint::ConstructorsList),
            Self::Seasons => Some(Endpoint::SeasonsList),
            _ => None,
        }
    }

    /// Profile route for an entry picked from this directory
    pub const fn entry(self, id: u32) -> Option<Self> {
        match self {
            Self::Drivers => Some(Self::Driver(id)),
            Self::Constructors => Some(Self::Constructor(id)),
            _ => None,
        }
    }

    /// Whether this route sits under the given navbar entry
    pub const fn within(self, section: Self) -> bool {
        matches!(
            (self, section),
            (Self::Home, Self::Home)
                | (Self::Drivers | Self::Driver(_), Self::Drivers)
                | (Self::Constructors | Self::Constructor(_), Self::Constructors)
                | (Self::Seasons, Self::Seasons)
        )
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim().trim_start_matches('#').trim_matches('/');
        let mut parts = trimmed.split('/');
        let route = match (parts.next(), parts.next(), parts.next()) {
            (Some(""), None, None) => Some(Self::Home),
            (Some("drivers"), None, None) => Some(Self::Drivers),
            (Some("constructors"), None, None) => Some(Self::Constructors),
            (Some("seasons" | "races"), None, None) => Some(Self::Seasons),
            (Some("driver"), Some(id), None) => id.parse().ok().map(Self::Driver),
            (Some("constructor"), Some(id), None) => id.parse().ok().map(Self::Constructor),
            _ => None,
        };
        route.ok_or_else(|| RouteError(path.to_string()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Capability to move the dashboard to another route
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Back-stack of visited routes
#[derive(Debug, Clone)]
pub struct History {
    stack: Vec<Route>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl History {
    const MAX_DEPTH: usize = 32;

    pub fn new(start: Route) -> Self {
        Self { stack: vec![start] }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    /// Pops back to the previous route; the first route is never popped
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

impl Navigator for History {
    /// Re-visiting the current route is a no-op and returning to the route
    /// just below it pops instead of pushing
    fn navigate(&mut self, route: Route) {
        let depth = self.stack.len();
        if self.stack.last() == Some(&route) {
            return;
        }
        if depth > 1 && self.stack[depth - 2] == route {
            self.stack.pop();
            return;
        }
        if depth >= Self::MAX_DEPTH {
            self.stack.remove(1);
        }
        self.stack.push(route);
    }
}

/// Numeric id typed ahead of a jump to a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdInput {
    digits: String,
}

impl IdInput {
    const MAX_DIGITS: usize = 9;

    /// Accepts ASCII digits only; anything else is left for the caller
    pub fn push(&mut self, c: char) -> bool {
        if c.is_ascii_digit() && self.digits.len() < Self::MAX_DIGITS {
            self.digits.push(c);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn take(&mut self) -> Option<u32> {
        let id = self.digits.parse().ok();
        self.digits.clear();
        id
    }
}
