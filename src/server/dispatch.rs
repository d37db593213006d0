// Request normalization and result-to-status mapping for /translate
// Author: kelexine (https://github.com/kelexine)

use crate::error::{GatewayError, Result};
use crate::translation::{AuthHeaders, TranslationRequestParams, TranslationResult};
use axum::http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

/// Query string of a `/translate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateQuery {
    pub text: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub token: Option<String>,
}

impl TranslateQuery {
    /// Pick the known parameters out of decoded query pairs.
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "text" => &mut query.text,
                "source_lang" => &mut query.source_lang,
                "target_lang" => &mut query.target_lang,
                "token" => &mut query.token,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// JSON body of a `POST /translate` call. A `token` in the body is ignored.
/// Fields are taken as any JSON value; checking them is the handler's job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateBody {
    pub text: Option<Value>,
    pub source_lang: Option<Value>,
    pub target_lang: Option<Value>,
}

/// Strings pass through as-is, `null` counts as absent, anything else is
/// handed over as its JSON text.
fn body_field(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// GET: every parameter, the token included, comes from the query string.
/// No auth headers are forwarded.
pub fn from_query(query: TranslateQuery) -> (TranslationRequestParams, AuthHeaders) {
    let params = TranslationRequestParams {
        text: query.text,
        source_lang: query.source_lang,
        target_lang: query.target_lang,
        token: query.token,
    };
    (params, AuthHeaders::default())
}

/// POST: business fields from the body, the token from the query string,
/// plus the inbound Authorization header.
pub fn from_body(
    body: TranslateBody,
    query: TranslateQuery,
    authorization: Option<String>,
) -> (TranslationRequestParams, AuthHeaders) {
    let params = TranslationRequestParams {
        text: body_field(body.text),
        source_lang: body_field(body.source_lang),
        target_lang: body_field(body.target_lang),
        token: query.token,
    };
    (params, AuthHeaders { authorization })
}

/// Decode a POST body. An empty body counts as `{}`.
pub fn parse_body(body: &[u8]) -> Result<TranslateBody> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TranslateBody::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid JSON body: {}", e)))
}

/// Build handler input for a request. Only GET and POST are routed here.
pub fn normalize(
    method: &Method,
    query: TranslateQuery,
    body: &[u8],
    headers: &HeaderMap,
) -> Result<(TranslationRequestParams, AuthHeaders)> {
    match *method {
        Method::GET => Ok(from_query(query)),
        Method::POST => {
            let body = parse_body(body)?;
            let authorization = headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            Ok(from_body(body, query, authorization))
        }
        ref other => Err(GatewayError::InvalidRequest(format!(
            "Unsupported method: {}",
            other
        ))),
    }
}

/// HTTP status for a handler result: 200 only when the result code is 200.
/// The body keeps the precise code.
pub fn status_for(result: &TranslationResult) -> StatusCode {
    if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn query(token: Option<&str>) -> TranslateQuery {
        TranslateQuery {
            text: Some("query text".into()),
            source_lang: Some("EN".into()),
            target_lang: Some("DE".into()),
            token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_get_reads_query_only() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer X"));

        let (params, auth) =
            normalize(&Method::GET, query(Some("t")), br#"{"text":"body"}"#, &headers).unwrap();

        assert_eq!(params.text.as_deref(), Some("query text"));
        assert_eq!(params.source_lang.as_deref(), Some("EN"));
        assert_eq!(params.target_lang.as_deref(), Some("DE"));
        assert_eq!(params.token.as_deref(), Some("t"));
        assert_eq!(auth, AuthHeaders::default());
    }

    #[test]
    fn test_post_reads_body_and_query_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer X"));
        let body = br#"{"text":"hello","source_lang":"EN","target_lang":"FR","token":"body-token"}"#;

        let (params, auth) = normalize(&Method::POST, query(Some("q")), body, &headers).unwrap();

        assert_eq!(params.text.as_deref(), Some("hello"));
        assert_eq!(params.target_lang.as_deref(), Some("FR"));
        assert_eq!(params.token.as_deref(), Some("q"));
        assert_eq!(auth.authorization.as_deref(), Some("Bearer X"));
    }

    #[test]
    fn test_post_without_query_token_ignores_body_token() {
        let body = br#"{"text":"hello","token":"body-token"}"#;
        let (params, auth) =
            normalize(&Method::POST, TranslateQuery::default(), body, &HeaderMap::new()).unwrap();

        assert!(params.token.is_none());
        assert!(params.target_lang.is_none());
        assert!(auth.authorization.is_none());
    }

    #[test]
    fn test_empty_post_body_is_empty_object() {
        let (params, _) =
            normalize(&Method::POST, TranslateQuery::default(), b"", &HeaderMap::new()).unwrap();
        assert_eq!(params, TranslationRequestParams::default());
    }

    #[test]
    fn test_invalid_post_body() {
        let err = parse_body(b"text=hello").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));

        let err = parse_body(b"[1, 2]").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }

    #[test]
    fn test_non_string_body_fields_pass_through() {
        let body = br#"{"text": 42, "source_lang": null, "target_lang": ["DE"]}"#;
        let (params, _) =
            normalize(&Method::POST, TranslateQuery::default(), body, &HeaderMap::new()).unwrap();

        assert_eq!(params.text.as_deref(), Some("42"));
        assert!(params.source_lang.is_none());
        assert_eq!(params.target_lang.as_deref(), Some(r#"["DE"]"#));
    }

    #[test]
    fn test_repeated_query_key_keeps_first() {
        let query = TranslateQuery::from_pairs(vec![
            ("text".into(), "a".into()),
            ("text".into(), "b".into()),
            ("target_lang".into(), "DE".into()),
            ("extra".into(), "x".into()),
        ]);

        assert_eq!(query.text.as_deref(), Some("a"));
        assert_eq!(query.target_lang.as_deref(), Some("DE"));
        assert!(query.token.is_none());
    }

    #[test]
    fn test_other_methods_rejected() {
        let result = normalize(&Method::PUT, TranslateQuery::default(), b"", &HeaderMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_status_collapse() {
        assert_eq!(
            status_for(&TranslationResult::failure(200, "ok")),
            StatusCode::OK
        );
        for code in [400, 401, 413, 429, 503] {
            assert_eq!(
                status_for(&TranslationResult::failure(code, "nope")),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
