// Google Translate web API client
// Author: kelexine (https://github.com/kelexine)

use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::metrics;
use crate::utils::retry::{parse_retry_after, with_retry, AttemptError};
use reqwest::header::RETRY_AFTER;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

const TRANSLATE_PATH: &str = "/translate_a/single";

/// A translated text and the language Google detected for the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleTranslation {
    pub text: String,
    pub detected_source: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Upstream rate limit reached: {0}")]
    RateLimited(String),

    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Upstream rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// Application code reported in the translation result.
    pub fn code(&self) -> u16 {
        match self {
            UpstreamError::RateLimited(_) => 429,
            UpstreamError::Unavailable(_) => 503,
            UpstreamError::Rejected { .. } => 502,
            UpstreamError::Malformed(_) => 500,
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::RateLimited(_) => "rate_limited",
            UpstreamError::Unavailable(_) => "unavailable",
            UpstreamError::Rejected { .. } => "rejected",
            UpstreamError::Malformed(_) => "malformed",
        }
    }
}

impl From<AttemptError> for UpstreamError {
    fn from(err: AttemptError) -> Self {
        match err.status {
            429 => UpstreamError::RateLimited(err.message),
            0 | 500..=599 => UpstreamError::Unavailable(err.message),
            status => UpstreamError::Rejected {
                status,
                message: err.message,
            },
        }
    }
}

/// Client for Google's public `translate_a/single` endpoint.
#[derive(Clone)]
pub struct GoogleClient {
    http_client: Client,
    base_url: String,
    max_retries: u32,
}

impl GoogleClient {
    /// Build a client with a pooled HTTP connection and the configured timeouts.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(5)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .user_agent(concat!("translate-gateway/", env!("CARGO_PKG_VERSION")))
            .use_rustls_tls()
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    /// Translate `text` from `source` (a Google code or `auto`) into `target`.
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> std::result::Result<GoogleTranslation, UpstreamError> {
        let started = Instant::now();
        let url = format!("{}{}", self.base_url, TRANSLATE_PATH);

        debug!("Calling Google Translate: sl={} tl={} chars={}", source, target, text.chars().count());

        let body = with_retry("Google Translate", self.max_retries, || async {
            let response = self
                .http_client
                .get(&url)
                .query(&[
                    ("client", "gtx"),
                    ("sl", source),
                    ("tl", target),
                    ("dt", "t"),
                    ("ie", "UTF-8"),
                    ("oe", "UTF-8"),
                    ("q", text),
                ])
                .send()
                .await
                .map_err(|e| AttemptError::new(0, format!("HTTP error: {}", e)))?;

            let status = response.status();
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_retry_after);
            let response_text = response
                .text()
                .await
                .map_err(|e| AttemptError::new(0, format!("Failed to read body: {}", e)))?;

            if !status.is_success() {
                return Err(AttemptError::new(status.as_u16(), truncate(&response_text, 200))
                    .with_retry_after(retry_after));
            }

            Ok(response_text)
        })
        .await
        .map_err(UpstreamError::from)
        .and_then(|body| parse_response(&body));

        let elapsed = started.elapsed().as_secs_f64();
        match &body {
            Ok(_) => metrics::record_upstream_call("success", elapsed),
            Err(e) => {
                warn!("Google Translate call failed: {}", e);
                metrics::record_upstream_call(e.outcome(), elapsed);
            }
        }

        body
    }
}

/// Parse the nested-array payload returned by `translate_a/single`.
///
/// Element `[0]` lists sentence segments whose first entry is the translated
/// text; element `[2]` is the detected source language.
pub fn parse_response(body: &str) -> std::result::Result<GoogleTranslation, UpstreamError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| UpstreamError::Malformed(format!("invalid JSON: {}", e)))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| UpstreamError::Malformed("missing sentence list".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    let detected_source = value
        .get(2)
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(GoogleTranslation {
        text,
        detected_source,
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_joins_segments() {
        let body = r#"[[["Hallo Welt. ","Hello world. ",null,null,10],["Wie geht's?","How are you?",null,null,10]],null,"en",null,null,null,null,[]]"#;
        let translation = parse_response(body).unwrap();
        assert_eq!(translation.text, "Hallo Welt. Wie geht's?");
        assert_eq!(translation.detected_source.as_deref(), Some("en"));
    }

    #[test]
    fn test_parse_skips_non_text_segments() {
        let body = r#"[[["Bonjour","Hello"],[null,null,"Bonjur"]],null,"en"]"#;
        let translation = parse_response(body).unwrap();
        assert_eq!(translation.text, "Bonjour");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_response("<html>captcha</html>"),
            Err(UpstreamError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(r#"{"error": "nope"}"#),
            Err(UpstreamError::Malformed(_))
        ));
    }

    #[test]
    fn test_attempt_error_mapping() {
        assert_eq!(UpstreamError::from(AttemptError::new(429, "slow down")).code(), 429);
        assert_eq!(UpstreamError::from(AttemptError::new(0, "timeout")).code(), 503);
        assert_eq!(UpstreamError::from(AttemptError::new(502, "bad gateway")).code(), 503);
        assert_eq!(UpstreamError::from(AttemptError::new(403, "forbidden")).code(), 502);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
