// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{api_doc_handler, health_handler, metrics_handler, translate_handler};
use super::middleware::{cors_layer, panic_response, request_id_layers, RequestSpan};
use crate::config::AppConfig;
use crate::introspection::Introspection;
use crate::translation::{AccessToken, TranslationHandler};
use axum::extract::DefaultBodyLimit;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<dyn TranslationHandler>,
    /// Set once at startup, read-only afterwards
    pub access_token: Option<Arc<AccessToken>>,
    pub introspection: Arc<Introspection>,
}

pub fn create_router(config: &AppConfig, handler: Arc<dyn TranslationHandler>) -> Router {
    let state = AppState {
        handler,
        access_token: config.access_token().and_then(AccessToken::new).map(Arc::new),
        introspection: Arc::new(Introspection::new(
            config.service.name.clone(),
            config.service.version.clone(),
        )),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/", get(api_doc_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/translate", get(translate_handler).post(translate_handler))
        // Enforced by the body extractor so oversized requests get a JSON 413
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(RequestSpan::new(config.logging.sanitize_tokens)),
        )
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
