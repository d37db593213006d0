//! Translation capability behind the `/translate` endpoint.
//!
//! The HTTP layer only knows the [`TranslationHandler`] trait: it hands over
//! normalized request parameters, the forwarded auth headers and the
//! process-wide access token, and gets back a [`TranslationResult`] whose
//! `code` carries the application-level outcome.
//!
//! # Submodules
//!
//! - `auth`: Access token storage and comparison.
//! - `languages`: Language code normalization for the upstream.
//! - `validate`: Parameter validation ahead of the upstream call.
//! - `google`: HTTP client for the Google Translate web endpoint.
//! - `handler`: The production [`TranslationHandler`] built on the above.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod auth;
pub mod google;
pub mod handler;
pub mod languages;
pub mod validate;

pub use auth::AccessToken;
pub use google::GoogleClient;
pub use handler::GoogleTranslateHandler;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Parameters of a single translation call, as extracted from the request.
///
/// Every field is optional: missing values are passed through untouched and
/// it is up to the handler to decide what they mean.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequestParams {
    pub text: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub token: Option<String>,
}

impl fmt::Debug for TranslationRequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationRequestParams")
            .field("text_len", &self.text.as_ref().map(|t| t.chars().count()))
            .field("source_lang", &self.source_lang)
            .field("target_lang", &self.target_lang)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Auth headers forwarded to the handler. Only POST requests carry any.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthHeaders {
    pub authorization: Option<String>,
}

impl fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeaders")
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Per-call handler options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Log request summaries and outcomes at `info` instead of `debug`.
    pub verbose: bool,
}

/// Outcome of a translation call.
///
/// `code` is an application status (200 on success). The remaining fields
/// are serialized flat next to it and forwarded to the client verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub code: u16,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl TranslationResult {
    /// Builds a result, dropping any `code` key from the payload so the
    /// serialized object never carries two of them.
    pub fn new(code: u16, mut payload: Map<String, Value>) -> Self {
        payload.remove("code");
        Self { code, payload }
    }

    /// A failed result with a human readable `message`.
    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("message".to_string(), Value::String(message.into()));
        Self::new(code, payload)
    }

    pub fn is_success(&self) -> bool {
        self.code == 200
    }
}

/// The capability invoked for every `/translate` request.
#[async_trait]
pub trait TranslationHandler: Send + Sync {
    /// Translate according to `params`.
    ///
    /// Failures the caller should see (bad token, invalid language,
    /// upstream errors) are reported as a result with a non-200 `code`.
    /// `Err` is reserved for faults in the handler itself.
    async fn translate(
        &self,
        params: TranslationRequestParams,
        headers: AuthHeaders,
        access_token: Option<&AccessToken>,
        options: TranslateOptions,
    ) -> Result<TranslationResult>;
}
