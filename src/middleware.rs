//! HTTP middleware: session binding and request tracking

use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info};

use crate::handlers::AppState;
use crate::session::{session_cookie, session_id_from_cookies, SessionId};

/// Bind every request to a session.
///
/// Reads the session cookie and stashes the `SessionId` in request
/// extensions for handlers to extract. A missing or malformed cookie gets
/// a fresh id, issued via `Set-Cookie` on the way out. The session entry
/// itself is created lazily on first data access.
pub async fn bind_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let config = &state.config;
    let (session_id, fresh) =
        match session_id_from_cookies(req.headers(), &config.cookie_name) {
            Some(id) => (id, false),
            None => {
                let id = SessionId::new();
                debug!(session_id = %id, "issuing new session");
                (id, true)
            }
        };

    req.extensions_mut().insert(session_id);
    let mut response = next.run(req).await;

    if fresh {
        response.headers_mut().append(
            SET_COOKIE,
            session_cookie(&config.cookie_name, session_id, config.cookie_secure),
        );
    }

    response
}

/// Log method, normalized path, status, and latency for every request.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    let status = response.status().as_u16();
    let normalized_path = normalize_path(&path);

    info!(
        method = %method,
        path = %normalized_path,
        status,
        latency_ms = format!("{latency_ms:.1}").as_str(),
        "request"
    );

    response
}

/// Normalize a path for logging so dynamic ids group together:
/// /lists/3/todos/7 -> /lists/{id}/todos/{id}
fn normalize_path(path: &str) -> String {
    let mut normalized = Vec::new();

    for part in path.split('/') {
        if part.is_empty() {
            continue;
        }

        if is_id(part) {
            normalized.push("{id}");
        } else {
            normalized.push(part);
        }
    }

    format!("/{}", normalized.join("/"))
}

/// List and todo ids are plain integers in paths.
fn is_id(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/lists"), "/lists");
        assert_eq!(normalize_path("/lists/3"), "/lists/{id}");
        assert_eq!(
            normalize_path("/lists/3/todos/17/destroy"),
            "/lists/{id}/todos/{id}/destroy"
        );
        assert_eq!(normalize_path("/lists/new"), "/lists/new");
        assert_eq!(normalize_path("/health"), "/health");
    }
}
