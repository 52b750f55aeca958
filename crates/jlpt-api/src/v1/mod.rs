use axum::Router;

use crate::{auth, grammar, progress, quiz, state::ApiState, vocabulary};

/// V1 API routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .merge(auth::routes())
        .merge(vocabulary::routes())
        .merge(grammar::routes())
        .merge(quiz::routes())
        .merge(progress::routes())
}
