//! Self-description payloads for `/` and `/health`.
//!
//! These are static documents derived from the service name and version;
//! they never touch the translation handler or the access token.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDoc {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointDoc>,
    pub authentication: AuthDoc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDoc {
    pub method: String,
    pub path: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,
    pub location: String,
    pub required: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthDoc {
    pub description: String,
    pub query_param: String,
    pub header: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Builds the introspection documents for one service identity.
#[derive(Debug, Clone)]
pub struct Introspection {
    name: String,
    version: String,
    started_at: Instant,
}

impl Introspection {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            started_at: Instant::now(),
        }
    }

    pub fn api_doc(&self) -> ApiDoc {
        api_doc(&self.name, &self.version)
    }

    pub fn health_check(&self) -> HealthResponse {
        HealthResponse {
            service: self.name.clone(),
            status: HealthStatus::Healthy,
            version: self.version.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: self.started_at.elapsed().as_secs(),
        }
    }
}

fn param(name: &str, location: &str, required: bool, description: &str) -> ParamDoc {
    ParamDoc {
        name: name.to_string(),
        location: location.to_string(),
        required,
        description: description.to_string(),
    }
}

fn translate_params(body: bool) -> Vec<ParamDoc> {
    let location = if body { "body" } else { "query" };
    let mut params = vec![
        param("text", location, true, "Text to translate"),
        param("source_lang", location, false, "Source language code, defaults to auto-detection"),
        param("target_lang", location, true, "Target language code, e.g. EN, DE, ZH"),
        param("token", "query", false, "Access token, when the service requires one"),
    ];
    if body {
        params.push(param(
            "Authorization",
            "header",
            false,
            "Bearer <token>, alternative to the token query parameter",
        ));
    }
    params
}

/// API document describing every route of the service.
pub fn api_doc(name: &str, version: &str) -> ApiDoc {
    ApiDoc {
        name: name.to_string(),
        version: version.to_string(),
        description: "Translate text between languages. Responses carry an application `code`; \
                      HTTP 200 is returned only when `code` is 200, every other outcome is HTTP 500."
            .to_string(),
        endpoints: vec![
            EndpointDoc {
                method: "GET".to_string(),
                path: "/".to_string(),
                description: "This document".to_string(),
                params: Vec::new(),
            },
            EndpointDoc {
                method: "GET".to_string(),
                path: "/health".to_string(),
                description: "Liveness check".to_string(),
                params: Vec::new(),
            },
            EndpointDoc {
                method: "GET".to_string(),
                path: "/translate".to_string(),
                description: "Translate text given in the query string".to_string(),
                params: translate_params(false),
            },
            EndpointDoc {
                method: "POST".to_string(),
                path: "/translate".to_string(),
                description: "Translate text given in a JSON body".to_string(),
                params: translate_params(true),
            },
            EndpointDoc {
                method: "GET".to_string(),
                path: "/metrics".to_string(),
                description: "Prometheus metrics in text exposition format".to_string(),
                params: Vec::new(),
            },
        ],
        authentication: AuthDoc {
            description: "When an access token is configured, pass it as ?token= or as a Bearer \
                          Authorization header (POST only)"
                .to_string(),
            query_param: "token".to_string(),
            header: "Authorization".to_string(),
        },
    }
}

/// One-off health payload for a named service.
pub fn health_check(service: &str) -> HealthResponse {
    Introspection::new(service, env!("CARGO_PKG_VERSION")).health_check()
}
