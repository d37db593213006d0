// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::dispatch::{self, TranslateQuery};
use super::routes::AppState;
use crate::error::GatewayError;
use crate::introspection::{ApiDoc, HealthResponse};
use crate::metrics;
use crate::translation::TranslateOptions;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::time::Instant;
use tracing::{debug, error};

/// Handler for `/`: the API document
pub async fn api_doc_handler(State(state): State<AppState>) -> Json<ApiDoc> {
    Json(state.introspection.api_doc())
}

/// Handler for `/health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.introspection.health_check())
}

/// Handler for `/metrics` in Prometheus text format
pub async fn metrics_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

/// Handler for `GET /translate` and `POST /translate`
pub async fn translate_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, GatewayError> {
    let started = Instant::now();

    let Query(pairs) = query.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let query = TranslateQuery::from_pairs(pairs);
    let body = body.map_err(body_rejection)?;
    let (params, auth_headers) = dispatch::normalize(&method, query, &body, &headers)?;

    debug!("Dispatching {} /translate: {:?}", method, params);

    let result = state
        .handler
        .translate(
            params,
            auth_headers,
            state.access_token.as_deref(),
            TranslateOptions { verbose: true },
        )
        .await
        .map_err(|e| {
            error!("Translation handler failed: {}", e);
            metrics::record_request(method.as_str(), 500, 500, started.elapsed().as_secs_f64());
            GatewayError::Internal(format!("Translation handler failed: {}", e))
        })?;

    let status = dispatch::status_for(&result);
    metrics::record_request(
        method.as_str(),
        status.as_u16(),
        result.code,
        started.elapsed().as_secs_f64(),
    );

    Ok((status, Json(result)).into_response())
}

fn body_rejection(rejection: BytesRejection) -> GatewayError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        metrics::record_rejection("too_large");
        GatewayError::PayloadTooLarge(rejection.body_text())
    } else {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}
