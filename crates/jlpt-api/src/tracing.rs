//! Logging setup.
//!
//! Development builds print pretty, human-readable events; production emits one
//! flattened JSON object per event for log aggregation. `RUST_LOG` overrides the
//! default filter in both modes.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Default filter directives when `RUST_LOG` is not set.
pub const fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "debug,tower_http=debug,sqlx=warn",
        Environment::Production => "info,tower_http=info,sqlx=warn",
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_tracing(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let (pretty, json) = if env.is_development() {
        let layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty();
        (Some(layer), None)
    } else {
        let layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();

    tracing::info!(environment = %env, "tracing initialized");
}
