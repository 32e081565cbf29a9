mod headless;
mod loop_handler;

pub use headless::{run_headless, HeadlessMode};
pub use loop_handler::run;
