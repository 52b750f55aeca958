//! Study streaks and per-user statistics.

pub mod model;
pub mod routes;
pub mod service;
pub mod streak;

pub use routes::routes;
pub use streak::record_study_activity;
