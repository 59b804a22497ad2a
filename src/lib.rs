//! Listkeep - session-backed to-do list server
//!
//! Users create named lists, add todos to them, mark todos complete, and
//! delete lists or todos. All state lives in the per-browser server-side
//! session; nothing is persisted across restarts.
//!
//! # Layout
//! - Pure helpers (validation, id allocation, display ordering) in
//!   [`validation`] and [`model`]
//! - Session store, flash messages, and the cookie codec in [`session`]
//! - HTTP handlers under [`handlers`], HTML rendering in [`views`]

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod session;
pub mod validation;
pub mod views;

// Re-export dependencies to ensure tests use the same version
pub use chrono;
pub use uuid;
