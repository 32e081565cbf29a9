mod animation;
mod app;
mod fetch;
mod render;
mod storage;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use crate::app::WebApp;
use crate::fetch::BrowserFetcher;
use crate::storage::LocalStorageSettings;

// The page is served by the same backend that answers /api/*
const API_BASE_URL: &str = "";

fn main() -> io::Result<()> {
    let app = Rc::new(RefCell::new(WebApp::new(
        Rc::new(BrowserFetcher::new(API_BASE_URL)),
        Box::new(LocalStorageSettings::new()),
    )));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let app = Rc::clone(&app);
        move |event| app.borrow_mut().handle_key(event.code)
    });

    terminal.draw_web(move |f| {
        let now_seconds = js_sys::Date::now() / 1000.0;
        app.borrow_mut().on_frame(now_seconds);
        render::render(&app.borrow(), f);
    });

    Ok(())
}
