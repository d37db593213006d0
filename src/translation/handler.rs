// Google-backed translation handler
// Author: kelexine (https://github.com/kelexine)

use super::auth::{authorize, AccessToken};
use super::google::GoogleClient;
use super::languages::display_code;
use super::validate::validate;
use super::{AuthHeaders, TranslateOptions, TranslationHandler, TranslationRequestParams, TranslationResult};
use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::metrics;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

/// Production [`TranslationHandler`]: token check, validation, then Google.
pub struct GoogleTranslateHandler {
    client: GoogleClient,
    max_text_length: usize,
}

impl GoogleTranslateHandler {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self::with_client(
            GoogleClient::new(config)?,
            config.max_text_length,
        ))
    }

    pub fn with_client(client: GoogleClient, max_text_length: usize) -> Self {
        Self {
            client,
            max_text_length,
        }
    }
}

#[async_trait]
impl TranslationHandler for GoogleTranslateHandler {
    async fn translate(
        &self,
        params: TranslationRequestParams,
        headers: AuthHeaders,
        access_token: Option<&AccessToken>,
        options: TranslateOptions,
    ) -> Result<TranslationResult> {
        if !authorize(access_token, &params, &headers) {
            warn!(target: "translate_gateway::translate", "Rejected translate call: invalid access token");
            metrics::record_rejection("unauthorized");
            return Ok(TranslationResult::failure(401, "Invalid access token"));
        }

        let request = match validate(&params, self.max_text_length) {
            Ok(request) => request,
            Err(e) => {
                if options.verbose {
                    info!(target: "translate_gateway::translate", "Rejected translate call: {}", e);
                } else {
                    debug!(target: "translate_gateway::translate", "Rejected translate call: {}", e);
                }
                metrics::record_rejection("invalid");
                return Ok(TranslationResult::failure(e.code(), e.to_string()));
            }
        };

        if options.verbose {
            info!(
                target: "translate_gateway::translate",
                source = request.source,
                target_lang = request.target,
                chars = request.text.chars().count(),
                "Translating"
            );
        } else {
            debug!(
                target: "translate_gateway::translate",
                source = request.source,
                target_lang = request.target,
                chars = request.text.chars().count(),
                "Translating"
            );
        }

        let translation = match self
            .client
            .translate(request.text, request.source, request.target)
            .await
        {
            Ok(translation) => translation,
            Err(e) => return Ok(TranslationResult::failure(e.code(), e.to_string())),
        };

        let source_lang = display_code(
            translation
                .detected_source
                .as_deref()
                .unwrap_or(request.source),
        );

        if options.verbose {
            info!(
                target: "translate_gateway::translate",
                detected = %source_lang,
                chars = translation.text.chars().count(),
                "Translation complete"
            );
        } else {
            debug!(
                target: "translate_gateway::translate",
                detected = %source_lang,
                chars = translation.text.chars().count(),
                "Translation complete"
            );
        }

        let mut payload = Map::new();
        payload.insert("id".into(), json!(uuid::Uuid::new_v4().to_string()));
        payload.insert("data".into(), Value::String(translation.text));
        payload.insert("alternatives".into(), json!([]));
        payload.insert("source_lang".into(), json!(source_lang));
        payload.insert("target_lang".into(), json!(display_code(request.target_label)));
        payload.insert("method".into(), json!("Free"));

        Ok(TranslationResult::new(200, payload))
    }
}
