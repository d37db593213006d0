// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use crate::error::GatewayError;
use crate::utils::logging::sanitize;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use std::any::Any;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// CORS: reflect any origin, allow GET and POST.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Turns a handler panic into the same JSON error body as other failures.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("Request handler panicked: {}", detail);
    GatewayError::Internal("Request handler panicked".to_string()).into_response()
}

/// Request span that keeps access tokens out of the logged URI.
#[derive(Debug, Clone, Copy)]
pub struct RequestSpan {
    sanitize_tokens: bool,
}

impl RequestSpan {
    pub fn new(sanitize_tokens: bool) -> Self {
        Self { sanitize_tokens }
    }
}

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let uri = request.uri().to_string();
        let uri = if self.sanitize_tokens { sanitize(&uri) } else { uri };
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %uri,
            request_id = %request_id,
        )
    }
}
