pub mod cards;
pub mod chart;
pub mod navbar;
pub mod popup;
pub mod status;
pub mod tables;
