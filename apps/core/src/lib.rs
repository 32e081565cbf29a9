// Shared pipeline for the F1 dashboard front-ends
pub mod api;
pub mod chart;
pub mod error;
pub mod fetch;
pub mod model;
pub mod nav;
pub mod orchestrator;
pub mod plot;
pub mod settings;
pub mod state;
pub mod view;

pub use api::Endpoint;
pub use chart::ChartSpec;
pub use error::FetchError;
pub use fetch::Fetcher;
pub use nav::{History, Navigator, Route};
pub use settings::{Settings, Theme};
pub use state::{Commit, Cycle, ViewHandle, ViewState};
