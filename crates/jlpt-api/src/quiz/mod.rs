//! Quizzes, quiz sessions and grading.

pub mod model;
pub mod routes;
pub mod service;

pub use routes::routes;
