//! Axum-based HTTP server for translate-gateway.
//!
//! This module sets up the router, middleware and handlers. Translation
//! itself is delegated to the [`TranslationHandler`](crate::translation::TranslationHandler)
//! held in [`AppState`].
//!
//! # Components
//!
//! - `dispatch`: Parameter extraction per HTTP method and status mapping.
//! - `handlers`: Endpoint implementations (docs, health, metrics, translate).
//! - `middleware`: Request IDs, CORS, panic recovery and request spans.
//! - `routes`: The router that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod dispatch;
mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
