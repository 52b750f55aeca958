//! Vocabulary browsing and spaced-repetition reviews.

pub mod model;
pub mod routes;
pub mod service;

pub use routes::routes;
