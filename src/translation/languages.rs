// Language code normalization (DeepL / ISO style -> Google)
// Author: kelexine (https://github.com/kelexine)

use phf::phf_map;
use thiserror::Error;

/// Google's marker for source language auto-detection.
pub const AUTO: &str = "auto";

/// Upper-cased client codes to Google Translate codes.
static LANGUAGES: phf::Map<&'static str, &'static str> = phf_map! {
    "AF" => "af",
    "AR" => "ar",
    "BG" => "bg",
    "BN" => "bn",
    "CA" => "ca",
    "CS" => "cs",
    "CY" => "cy",
    "DA" => "da",
    "DE" => "de",
    "EL" => "el",
    "EN" => "en",
    "EN-GB" => "en",
    "EN-US" => "en",
    "ES" => "es",
    "ES-419" => "es",
    "ET" => "et",
    "FA" => "fa",
    "FI" => "fi",
    "FIL" => "tl",
    "FR" => "fr",
    "GA" => "ga",
    "HE" => "iw",
    "HI" => "hi",
    "HR" => "hr",
    "HU" => "hu",
    "ID" => "id",
    "IS" => "is",
    "IT" => "it",
    "IW" => "iw",
    "JA" => "ja",
    "KA" => "ka",
    "KK" => "kk",
    "KO" => "ko",
    "LT" => "lt",
    "LV" => "lv",
    "MS" => "ms",
    "MT" => "mt",
    "NB" => "no",
    "NL" => "nl",
    "NO" => "no",
    "PL" => "pl",
    "PT" => "pt",
    "PT-BR" => "pt",
    "PT-PT" => "pt",
    "RO" => "ro",
    "RU" => "ru",
    "SK" => "sk",
    "SL" => "sl",
    "SQ" => "sq",
    "SR" => "sr",
    "SV" => "sv",
    "SW" => "sw",
    "TA" => "ta",
    "TH" => "th",
    "TL" => "tl",
    "TR" => "tr",
    "UK" => "uk",
    "UR" => "ur",
    "UZ" => "uz",
    "VI" => "vi",
    "ZH" => "zh-CN",
    "ZH-CN" => "zh-CN",
    "ZH-HANS" => "zh-CN",
    "ZH-HANT" => "zh-TW",
    "ZH-HK" => "zh-TW",
    "ZH-TW" => "zh-TW",
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("target_lang is required")]
    MissingTarget,

    #[error("Unsupported language: {0}")]
    Unsupported(String),

    #[error("target_lang cannot be auto")]
    AutoTarget,
}

/// Canonical form used for lookups: trimmed, upper-case, `_` as `-`.
fn canonical(code: &str) -> String {
    code.trim().replace('_', "-").to_ascii_uppercase()
}

fn lookup(code: &str) -> Option<&'static str> {
    let canonical = canonical(code);
    if let Some(google) = LANGUAGES.get(canonical.as_str()) {
        return Some(*google);
    }

    // Fall back to the primary subtag, e.g. DE-AT -> DE
    canonical
        .split_once('-')
        .and_then(|(primary, _)| LANGUAGES.get(primary).copied())
}

/// Resolve the source language. Missing, empty and `auto` all mean detection.
pub fn source_code(lang: Option<&str>) -> Result<&'static str, LanguageError> {
    match lang.map(str::trim) {
        None | Some("") => Ok(AUTO),
        Some(code) if code.eq_ignore_ascii_case(AUTO) => Ok(AUTO),
        Some(code) => lookup(code).ok_or_else(|| LanguageError::Unsupported(code.to_string())),
    }
}

/// Resolve the target language, which must be an explicit language.
pub fn target_code(lang: Option<&str>) -> Result<&'static str, LanguageError> {
    match lang.map(str::trim) {
        None | Some("") => Err(LanguageError::MissingTarget),
        Some(code) if code.eq_ignore_ascii_case(AUTO) => Err(LanguageError::AutoTarget),
        Some(code) => lookup(code).ok_or_else(|| LanguageError::Unsupported(code.to_string())),
    }
}

/// Upper-cased label echoed back to clients, e.g. `zh-CN` -> `ZH-CN`.
pub fn display_code(code: &str) -> String {
    canonical(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_defaults_to_auto() {
        assert_eq!(source_code(None), Ok(AUTO));
        assert_eq!(source_code(Some("")), Ok(AUTO));
        assert_eq!(source_code(Some("AUTO")), Ok(AUTO));
        assert_eq!(source_code(Some(" auto ")), Ok(AUTO));
    }

    #[test]
    fn test_deepl_style_codes() {
        assert_eq!(target_code(Some("ZH")), Ok("zh-CN"));
        assert_eq!(target_code(Some("zh-hant")), Ok("zh-TW"));
        assert_eq!(target_code(Some("EN-US")), Ok("en"));
        assert_eq!(target_code(Some("pt_BR")), Ok("pt"));
        assert_eq!(target_code(Some("NB")), Ok("no"));
        assert_eq!(target_code(Some("HE")), Ok("iw"));
    }

    #[test]
    fn test_region_falls_back_to_primary() {
        assert_eq!(target_code(Some("de-AT")), Ok("de"));
        assert_eq!(source_code(Some("FR-CA")), Ok("fr"));
    }

    #[test]
    fn test_target_errors() {
        assert_eq!(target_code(None), Err(LanguageError::MissingTarget));
        assert_eq!(target_code(Some("  ")), Err(LanguageError::MissingTarget));
        assert_eq!(target_code(Some("auto")), Err(LanguageError::AutoTarget));
        assert_eq!(
            target_code(Some("klingon")),
            Err(LanguageError::Unsupported("klingon".to_string()))
        );
    }

    #[test]
    fn test_display_code() {
        assert_eq!(display_code("zh-CN"), "ZH-CN");
        assert_eq!(display_code("en"), "EN");
    }
}
