// Terminal front-end for the F1 dashboard; the binary lives in main.rs
pub mod app;
pub mod cli;
pub mod config;
pub mod event;
pub mod http;
pub mod logging;
pub mod settings;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use http::HttpFetcher;
pub use settings::FileSettings;
