//! Per-browser session store
//!
//! Each browser gets a random 128-bit session id carried in an HttpOnly
//! cookie; the data itself (the list collection plus one transient flash
//! message) stays server side in a `DashMap`. Random v4 UUIDs make the
//! cookie unguessable, so no signing secret is needed.
//!
//! Sessions are created lazily on first access and dropped by a periodic
//! sweep once idle longer than the configured TTL. A browser presenting a
//! swept id simply starts over with an empty collection under the same id.

use axum::http::{header::COOKIE, HeaderMap, HeaderValue};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::model::TodoList;

/// Opaque session identifier, carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-shot user-facing message, displayed by the next rendered page and
/// cleared on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Error(msg) => msg,
        }
    }

    /// CSS class for the flash banner.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

/// Everything one session owns: the list collection and the pending flash.
///
/// Handlers receive this as an explicit `&mut` inside [`SessionStore::with`];
/// there is no process-wide singleton to reach into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    pub lists: Vec<TodoList>,
    pub flash: Option<Flash>,
}

#[derive(Debug)]
struct SessionEntry {
    data: SessionData,
    last_seen: DateTime<Utc>,
}

/// Concurrent session map. One entry per browser session.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, SessionEntry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` over the session's data, creating the session empty if it
    /// does not exist yet. Refreshes the idle timer.
    ///
    /// The DashMap entry guard serializes access per session, which is all
    /// the coordination a single-writer-per-session model needs.
    pub fn with<R>(&self, id: SessionId, f: impl FnOnce(&mut SessionData) -> R) -> R {
        let mut entry = self.sessions.entry(id).or_insert_with(|| SessionEntry {
            data: SessionData::default(),
            last_seen: Utc::now(),
        });
        entry.last_seen = Utc::now();
        f(&mut entry.data)
    }

    /// Take the pending flash message, clearing it.
    pub fn take_flash(&self, id: SessionId) -> Option<Flash> {
        self.with(id, |data| data.flash.take())
    }

    /// Store a flash message for the next rendered page.
    pub fn set_flash(&self, id: SessionId, flash: Flash) {
        self.with(id, |data| data.flash = Some(flash));
    }

    /// Drop sessions idle longer than `ttl`. Returns how many were removed.
    pub fn sweep_expired(&self, ttl: Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| entry.last_seen >= cutoff);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// ── cookie codec ──

/// Extract the session id from the request's `Cookie` header, if present
/// and well formed.
pub fn session_id_from_cookies(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    // Multiple Cookie headers are legal; scan them all.
    headers.get_all(COOKIE).iter().find_map(|header| {
        let raw = header.to_str().ok()?;
        raw.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            if name == cookie_name {
                SessionId::parse(value)
            } else {
                None
            }
        })
    })
}

/// Build the `Set-Cookie` value for a freshly issued session id.
pub fn session_cookie(cookie_name: &str, id: SessionId, secure: bool) -> HeaderValue {
    let mut cookie = format!("{cookie_name}={id}; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    // Only ASCII from known-safe parts, so this cannot fail.
    HeaderValue::from_str(&cookie)
        .unwrap_or_else(|_| HeaderValue::from_static(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Todo, TodoList};

    const NAME: &str = "listkeep_session";

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_sessions_created_lazily() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        let id = SessionId::new();
        let count = store.with(id, |data| data.lists.len());
        assert_eq!(count, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_mutations_visible_across_accesses() {
        let store = SessionStore::new();
        let id = SessionId::new();

        store.with(id, |data| {
            let mut list = TodoList::new(1, "Groceries");
            list.todos.push(Todo::new(1, "Milk"));
            data.lists.push(list);
        });

        let names: Vec<String> = store.with(id, |data| {
            data.lists.iter().map(|l| l.name.clone()).collect()
        });
        assert_eq!(names, vec!["Groceries"]);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = SessionId::new();
        let b = SessionId::new();

        store.with(a, |data| data.lists.push(TodoList::new(1, "Mine")));

        let b_lists = store.with(b, |data| data.lists.len());
        assert_eq!(b_lists, 0);
    }

    #[test]
    fn test_take_flash_clears() {
        let store = SessionStore::new();
        let id = SessionId::new();

        store.set_flash(id, Flash::Success("The list has been created.".into()));
        let flash = store.take_flash(id);
        assert_eq!(
            flash,
            Some(Flash::Success("The list has been created.".into()))
        );
        assert_eq!(store.take_flash(id), None);
    }

    #[test]
    fn test_sweep_drops_only_expired() {
        let store = SessionStore::new();
        let stale = SessionId::new();
        let fresh = SessionId::new();
        store.with(stale, |_| {});
        store.with(fresh, |_| {});

        // Backdate one session past the TTL.
        store
            .sessions
            .get_mut(&stale)
            .unwrap()
            .last_seen = Utc::now() - Duration::hours(2);

        let removed = store.sweep_expired(Duration::hours(1));
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_cookie_roundtrip() {
        let id = SessionId::new();
        let value = session_cookie(NAME, id, false);
        let sent = value.to_str().unwrap().split(';').next().unwrap().to_string();

        let headers = headers_with_cookie(&sent);
        assert_eq!(session_id_from_cookies(&headers, NAME), Some(id));
    }

    #[test]
    fn test_cookie_attributes() {
        let id = SessionId::new();
        let plain = session_cookie(NAME, id, false);
        let plain = plain.to_str().unwrap();
        assert!(plain.contains("HttpOnly"));
        assert!(plain.contains("SameSite=Lax"));
        assert!(!plain.contains("Secure"));

        let secure = session_cookie(NAME, id, true);
        assert!(secure.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_cookie_parse_ignores_other_cookies() {
        let id = SessionId::new();
        let headers =
            headers_with_cookie(&format!("theme=dark; {NAME}={id}; lang=en"));
        assert_eq!(session_id_from_cookies(&headers, NAME), Some(id));
    }

    #[test]
    fn test_cookie_parse_rejects_garbage() {
        let headers = headers_with_cookie(&format!("{NAME}=not-a-uuid"));
        assert_eq!(session_id_from_cookies(&headers, NAME), None);

        let headers = headers_with_cookie("unrelated=1");
        assert_eq!(session_id_from_cookies(&headers, NAME), None);
    }
}
