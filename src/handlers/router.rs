//! Router configuration - centralized route definitions
//!
//! Session-bound routes are wrapped in the session middleware; `/health`
//! stays outside it so probes never allocate sessions.

use axum::{
    routing::{get, post},
    Router,
};

use super::{health, lists, todos, AppState};
use crate::middleware::bind_session;

/// Build the complete router.
///
/// Request logging, concurrency limits, and timeouts are applied by the
/// caller (main.rs) as outer layers.
pub fn build_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/", get(lists::root))
        // =================================================================
        // LISTS
        // =================================================================
        .route("/lists", get(lists::index).post(lists::create))
        .route("/lists/new", get(lists::new_form))
        .route("/lists/{id}", get(lists::show).post(lists::rename))
        .route("/lists/{id}/edit", get(lists::edit_form))
        .route("/lists/{id}/destroy", post(lists::destroy))
        .route("/lists/{id}/complete_all", post(lists::complete_all))
        // =================================================================
        // TODOS
        // =================================================================
        .route("/lists/{list_id}/todos", post(todos::create))
        .route("/lists/{list_id}/todos/{id}", post(todos::toggle))
        .route("/lists/{list_id}/todos/{id}/destroy", post(todos::destroy))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bind_session,
        ))
        .with_state(state.clone());

    let infra_routes = Router::new()
        .route("/health", get(health::health))
        .with_state(state);

    Router::new().merge(session_routes).merge(infra_routes)
}
