// App module for f1-dash
// Handles view state, navigation and key handling

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::App;
