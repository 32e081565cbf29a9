use std::convert::Infallible;
use std::rc::Rc;

use f1_dashboard_core::model::{ConstructorProfile, Dashboard, DirectoryEntry, DriverProfile};
use f1_dashboard_core::nav::IdInput;
use f1_dashboard_core::orchestrator::{
    load_constructor_profile, load_dashboard, load_directory, load_driver_profile,
};
use f1_dashboard_core::{Fetcher, Navigator, Route, Settings, Theme, ViewHandle};
use ratzilla::event::KeyCode;
use wasm_bindgen_futures::spawn_local;

use crate::animation::{advance_spinner, SpinnerMode};

/// Browser-side view state; the URL hash is the source of truth for the route
pub struct WebApp {
    pub route: Route,
    pub theme: Theme,
    pub show_help: bool,
    pub selected_index: usize,
    pub id_input: IdInput,
    pub spinner: f64,
    pub dashboard: ViewHandle<Dashboard>,
    pub driver: ViewHandle<DriverProfile>,
    pub constructor: ViewHandle<ConstructorProfile>,
    pub directory: ViewHandle<Vec<DirectoryEntry>>,
    last_tick: Option<f64>,
    mounted: Option<Route>,
    fetcher: Rc<dyn Fetcher>,
    settings: Box<dyn Settings>,
}

impl WebApp {
    pub fn new(fetcher: Rc<dyn Fetcher>, settings: Box<dyn Settings>) -> Self {
        let theme = Theme::load(settings.as_ref());
        Self {
            route: current_hash_route(),
            theme,
            show_help: false,
            selected_index: 0,
            id_input: IdInput::default(),
            spinner: 0.0,
            dashboard: ViewHandle::new(),
            driver: ViewHandle::new(),
            constructor: ViewHandle::new(),
            directory: ViewHandle::new(),
            last_tick: None,
            mounted: None,
            fetcher,
            settings,
        }
    }

    /// Called once per animation frame before drawing
    pub fn on_frame(&mut self, now_seconds: f64) {
        // Browser back/forward only changes the hash
        let hashed = current_hash_route();
        if hashed != self.route {
            self.route = hashed;
        }
        if self.mounted != Some(self.route) {
            self.mount(self.route);
        }

        let mode = if self.is_loading() {
            SpinnerMode::Running
        } else {
            SpinnerMode::Paused
        };
        (self.spinner, self.last_tick) =
            advance_spinner(self.spinner, self.last_tick, now_seconds, mode);
    }

    pub fn is_loading(&self) -> bool {
        match self.route {
            Route::Home => self.dashboard.state().is_loading(),
            Route::Driver(_) => self.driver.state().is_loading(),
            Route::Constructor(_) => self.constructor.state().is_loading(),
            Route::Drivers | Route::Constructors | Route::Seasons => {
                self.directory.state().is_loading()
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Char('?') | KeyCode::F(1)) {
            self.show_help = !self.show_help;
            return;
        }
        if self.show_help {
            if matches!(code, KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.id_input.push(c);
            }
            KeyCode::Backspace => {
                self.id_input.pop();
            }
            KeyCode::Esc if !self.id_input.is_empty() => self.id_input.clear(),
            KeyCode::Esc => go_back(),
            KeyCode::Enter => self.enter(),
            KeyCode::Char('h') => self.navigate(Route::Home),
            KeyCode::Char('d') => self.navigate(Route::Drivers),
            KeyCode::Char('c') => self.navigate(Route::Constructors),
            KeyCode::Char('s') => self.navigate(Route::Seasons),
            KeyCode::Left => self.cycle_tab(false),
            KeyCode::Right => self.cycle_tab(true),
            KeyCode::Char('r') => self.mount(self.route),
            KeyCode::Char('t') => self.theme.toggle(self.settings.as_mut()),
            KeyCode::Up => self.selected_index = self.selected_index.saturating_sub(1),
            KeyCode::Down => self.select_next(1),
            KeyCode::PageUp => self.selected_index = self.selected_index.saturating_sub(10),
            KeyCode::PageDown => self.select_next(10),
            KeyCode::Home => self.selected_index = 0,
            KeyCode::End => self.select_next(usize::MAX / 2),
            _ => {}
        }
    }

    fn enter(&mut self) {
        if let Some(id) = self.id_input.take() {
            let route = match self.route {
                Route::Constructors | Route::Constructor(_) => Route::Constructor(id),
                _ => Route::Driver(id),
            };
            self.navigate(route);
            return;
        }

        let id = self
            .directory
            .state()
            .ready()
            .and_then(|entries| entries.get(self.selected_index))
            .map(|entry| entry.id);
        if let Some(route) = id.and_then(|id| self.route.entry(id)) {
            self.navigate(route);
        }
    }

    fn select_next(&mut self, step: usize) {
        let len = self.directory.state().ready().map_or(0, Vec::len);
        if len > 0 {
            self.selected_index = self.selected_index.saturating_add(step).min(len - 1);
        }
    }

    fn cycle_tab(&mut self, forward: bool) {
        let len = Route::NAVBAR.len();
        let index = Route::NAVBAR
            .iter()
            .position(|section| self.route.within(*section))
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.navigate(Route::NAVBAR[next]);
    }

    fn mount(&mut self, route: Route) {
        if let Some(previous) = self.mounted.take() {
            match previous {
                Route::Home => self.dashboard.unmount(),
                Route::Driver(_) => self.driver.unmount(),
                Route::Constructor(_) => self.constructor.unmount(),
                Route::Drivers | Route::Constructors | Route::Seasons => {
                    self.directory.unmount();
                }
            }
        }
        self.mounted = Some(route);
        self.selected_index = 0;

        let fetcher = Rc::clone(&self.fetcher);
        match route {
            Route::Home => {
                let cycle = self.dashboard.begin(route.path());
                spawn_local(async move {
                    cycle
                        .run(async { Ok::<_, Infallible>(load_dashboard(&*fetcher).await) })
                        .await;
                });
            }
            Route::Driver(id) => {
                let cycle = self.driver.begin(id.to_string());
                spawn_local(async move {
                    cycle.run(load_driver_profile(&*fetcher, id)).await;
                });
            }
            Route::Constructor(id) => {
                let cycle = self.constructor.begin(id.to_string());
                spawn_local(async move {
                    cycle.run(load_constructor_profile(&*fetcher, id)).await;
                });
            }
            Route::Drivers | Route::Constructors | Route::Seasons => {
                if let Some(endpoint) = route.directory() {
                    let cycle = self.directory.begin(route.path());
                    spawn_local(async move {
                        cycle.run(load_directory(&*fetcher, endpoint)).await;
                    });
                }
            }
        }
    }
}

impl Navigator for WebApp {
    fn navigate(&mut self, route: Route) {
        self.id_input.clear();
        self.route = route;
        set_hash(route);
    }
}

fn location() -> Option<web_sys::Location> {
    web_sys::window().map(|window| window.location())
}

fn current_hash_route() -> Route {
    location()
        .and_then(|location| location.hash().ok())
        .and_then(|hash| hash.parse().ok())
        .unwrap_or(Route::Home)
}

fn set_hash(route: Route) {
    if let Some(location) = location() {
        if let Err(err) = location.set_hash(&route.path()) {
            web_sys::console::error_1(&err);
        }
    }
}

fn go_back() {
    if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
        if let Err(err) = history.back() {
            web_sys::console::error_1(&err);
        }
    }
}
