//! HTTP API of the JLPT study backend.
//!
//! Wires the spaced-repetition scheduler and the quiz grader to PostgreSQL
//! behind an axum router. Build an [`ApiState`] from an [`ApiConfig`] and a
//! pool, then serve [`router::router`].

pub mod auth;
pub mod config;
pub mod error;
pub mod grammar;
pub mod metrics;
pub mod middleware;
pub mod progress;
pub mod quiz;
pub mod router;
pub mod state;
pub mod tracing;
pub mod v1;
pub mod validation;
pub mod vocabulary;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
