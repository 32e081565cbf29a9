use chrono::{DateTime, Local};
use f1_dashboard_core::model::{ConstructorProfile, Dashboard, DirectoryEntry, DriverProfile};
use f1_dashboard_core::nav::IdInput;
use f1_dashboard_core::orchestrator::{
    load_constructor_profile, load_dashboard, load_directory, load_driver_profile,
};
use f1_dashboard_core::{Fetcher, History, Navigator, Route, Settings, Theme, ViewHandle};
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;
use throbber_widgets_tui::ThrobberState;
use tokio::task::spawn_local;
use tracing::info;

pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub theme: Theme,
    pub status_message: String,
    pub history: History,
    pub id_input: IdInput,
    pub selected_index: usize,
    pub refreshed_at: Option<DateTime<Local>>,
    pub throbber: ThrobberState,
    pub dashboard: ViewHandle<Dashboard>,
    pub driver: ViewHandle<DriverProfile>,
    pub constructor: ViewHandle<ConstructorProfile>,
    pub directory: ViewHandle<Vec<DirectoryEntry>>,
    mounted: Option<Route>,
    fetcher: Rc<dyn Fetcher>,
    settings: Box<dyn Settings>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("route", &self.route())
            .field("mounted", &self.mounted)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(fetcher: Rc<dyn Fetcher>, settings: Box<dyn Settings>, start: Route) -> Self {
        let theme = Theme::load(settings.as_ref());
        Self {
            running: true,
            show_help: false,
            theme,
            status_message: String::new(),
            history: History::new(start),
            id_input: IdInput::default(),
            selected_index: 0,
            refreshed_at: None,
            throbber: ThrobberState::default(),
            dashboard: ViewHandle::new(),
            driver: ViewHandle::new(),
            constructor: ViewHandle::new(),
            directory: ViewHandle::new(),
            mounted: None,
            fetcher,
            settings,
        }
    }

    pub fn route(&self) -> Route {
        self.history.current()
    }

    /// Mounts the current route if it is not already showing.
    ///
    /// Must run inside a `LocalSet`: fetch cycles are spawned as local tasks.
    pub fn sync(&mut self) {
        let route = self.route();
        if self.mounted != Some(route) {
            self.mount(route);
        }
    }

    /// Starts a fresh cycle for the current route
    pub fn reload(&mut self) {
        self.mount(self.route());
        self.status_message = "Reloading...".to_string();
    }

    pub fn back(&mut self) {
        if self.history.back() {
            self.sync();
        }
    }

    pub fn on_tick(&mut self) {
        self.throbber.calc_next();
        if self.status_message == "Reloading..." && !self.is_loading() {
            self.status_message.clear();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle(self.settings.as_mut());
        self.status_message = format!("Theme: {}", self.theme.as_str());
    }

    pub fn is_loading(&self) -> bool {
        match self.route() {
            Route::Home => self.dashboard.state().is_loading(),
            Route::Driver(_) => self.driver.state().is_loading(),
            Route::Constructor(_) => self.constructor.state().is_loading(),
            Route::Drivers | Route::Constructors | Route::Seasons => {
                self.directory.state().is_loading()
            }
        }
    }

    pub fn directory_len(&self) -> usize {
        self.directory.state().ready().map_or(0, Vec::len)
    }

    pub fn select_next(&mut self, step: usize) {
        let len = self.directory_len();
        if len > 0 {
            self.selected_index = (self.selected_index + step).min(len - 1);
        }
    }

    pub fn select_previous(&mut self, step: usize) {
        self.selected_index = self.selected_index.saturating_sub(step);
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.directory_len().saturating_sub(1);
    }

    /// Opens the profile behind the highlighted directory row
    pub fn open_selected(&mut self) {
        let id = self
            .directory
            .state()
            .ready()
            .and_then(|entries| entries.get(self.selected_index))
            .map(|entry| entry.id);

        if let Some(route) = id.and_then(|id| self.route().entry(id)) {
            self.navigate(route);
        }
    }

    /// Jumps to the profile whose id was typed ahead
    pub fn submit_id(&mut self) {
        let Some(id) = self.id_input.take() else {
            return;
        };
        let route = match self.route() {
            Route::Constructors | Route::Constructor(_) => Route::Constructor(id),
            _ => Route::Driver(id),
        };
        self.navigate(route);
    }

    fn mount(&mut self, route: Route) {
        if let Some(previous) = self.mounted.take() {
            self.unmount(previous);
        }
        info!(%route, "mounting view");
        self.mounted = Some(route);
        self.selected_index = 0;
        self.refreshed_at = Some(Local::now());

        let fetcher = Rc::clone(&self.fetcher);
        match route {
            Route::Home => {
                let cycle = self.dashboard.begin(route.path());
                spawn_local(async move {
                    cycle
                        .run(async { Ok::<_, Infallible>(load_dashboard(&*fetcher).await) })
                        .await
                });
            }
            Route::Driver(id) => {
                let cycle = self.driver.begin(id.to_string());
                spawn_local(async move { cycle.run(load_driver_profile(&*fetcher, id)).await });
            }
            Route::Constructor(id) => {
                let cycle = self.constructor.begin(id.to_string());
                spawn_local(
                    async move { cycle.run(load_constructor_profile(&*fetcher, id)).await },
                );
            }
            Route::Drivers | Route::Constructors | Route::Seasons => {
                if let Some(endpoint) = route.directory() {
                    let cycle = self.directory.begin(route.path());
                    spawn_local(async move { cycle.run(load_directory(&*fetcher, endpoint)).await });
                }
            }
        }
    }

    fn unmount(&self, route: Route) {
        match route {
            Route::Home => self.dashboard.unmount(),
            Route::Driver(_) => self.driver.unmount(),
            Route::Constructor(_) => self.constructor.unmount(),
            Route::Drivers | Route::Constructors | Route::Seasons => self.directory.unmount(),
        }
    }
}

impl Navigator for App {
    fn navigate(&mut self, route: Route) {
        self.id_input.clear();
        if route != self.route() {
            self.history.navigate(route);
        }
        self.sync();
    }
}
