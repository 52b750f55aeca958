//! Email/password accounts and JWT sessions.

pub mod jwt;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod service;
pub mod validation;

pub use middleware::AuthUser;
pub use routes::routes;
