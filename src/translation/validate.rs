// Request validation ahead of the upstream call
// Author: kelexine (https://github.com/kelexine)

use super::languages::{self, LanguageError};
use super::TranslationRequestParams;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("text is required")]
    MissingText,

    #[error("text exceeds {limit} characters (got {actual})")]
    TextTooLong { limit: usize, actual: usize },

    #[error(transparent)]
    Language(#[from] LanguageError),
}

impl ValidationError {
    /// Application code reported in the translation result.
    pub fn code(&self) -> u16 {
        match self {
            ValidationError::TextTooLong { .. } => 413,
            _ => 400,
        }
    }
}

/// A request that passed validation, with Google language codes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest<'a> {
    pub text: &'a str,
    pub source: &'static str,
    pub target: &'static str,
    /// Target code as the client sent it, for echoing back.
    pub target_label: &'a str,
}

pub fn validate(
    params: &TranslationRequestParams,
    max_text_length: usize,
) -> Result<ValidatedRequest<'_>, ValidationError> {
    let text = params
        .text
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .ok_or(ValidationError::MissingText)?;

    let length = text.chars().count();
    if length > max_text_length {
        return Err(ValidationError::TextTooLong {
            limit: max_text_length,
            actual: length,
        });
    }

    let source = languages::source_code(params.source_lang.as_deref())?;
    let target = languages::target_code(params.target_lang.as_deref())?;

    Ok(ValidatedRequest {
        text,
        source,
        target,
        target_label: params.target_lang.as_deref().unwrap_or_default().trim(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(text: Option<&str>, source: Option<&str>, target: Option<&str>) -> TranslationRequestParams {
        TranslationRequestParams {
            text: text.map(str::to_string),
            source_lang: source.map(str::to_string),
            target_lang: target.map(str::to_string),
            token: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let params = params(Some("Hello"), Some("EN"), Some("ZH"));
        let request = validate(&params, 100).unwrap();
        assert_eq!(request.text, "Hello");
        assert_eq!(request.source, "en");
        assert_eq!(request.target, "zh-CN");
        assert_eq!(request.target_label, "ZH");
    }

    #[test]
    fn test_missing_text() {
        let err = validate(&params(None, None, Some("DE")), 100).unwrap_err();
        assert_eq!(err, ValidationError::MissingText);
        assert_eq!(err.code(), 400);

        let err = validate(&params(Some("  \n"), None, Some("DE")), 100).unwrap_err();
        assert_eq!(err, ValidationError::MissingText);
    }

    #[test]
    fn test_missing_target() {
        let err = validate(&params(Some("Hi"), None, None), 100).unwrap_err();
        assert_eq!(err, ValidationError::Language(LanguageError::MissingTarget));
        assert_eq!(err.code(), 400);
    }

    #[test]
    fn test_text_too_long_counts_chars() {
        // Four characters, twelve bytes
        let params = params(Some("日本語だ"), None, Some("EN"));
        assert!(validate(&params, 4).is_ok());

        let err = validate(&params, 3).unwrap_err();
        assert_eq!(err, ValidationError::TextTooLong { limit: 3, actual: 4 });
        assert_eq!(err.code(), 413);
    }
}
