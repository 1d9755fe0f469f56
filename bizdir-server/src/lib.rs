//! bizdir-server: HTTP API for businesses, reviews and photos
//!
//! Request bodies are gated by the per-resource schemas from `bizdir-core`,
//! persisted through a generic Postgres repository, and answered with
//! JSON status-mapped responses.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
