pub mod dashboard;
pub mod directory;
pub mod help;
pub mod profile;
