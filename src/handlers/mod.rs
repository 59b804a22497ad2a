//! HTTP handlers - one submodule per resource
//!
//! Every session-bound handler follows the same shape: extract the
//! `SessionId` the middleware bound, read or mutate the session's list
//! collection inside `SessionStore::with`, leave a flash message, and
//! redirect (or re-render the form when validation fails).

pub mod health;
pub mod lists;
pub mod router;
pub mod state;
pub mod todos;

pub use router::build_router;
pub use state::{spawn_session_sweeper, AppState, SessionManager};

use axum::http::HeaderMap;

/// Conventional header marking script-driven (asynchronous) clients.
/// Such clients get a bare acknowledgment for deletes instead of a redirect.
pub(crate) fn is_xhr(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        == Some("XMLHttpRequest")
}
