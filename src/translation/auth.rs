// Access token handling
// Author: kelexine (https://github.com/kelexine)

use super::{AuthHeaders, TranslationRequestParams};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::Zeroizing;

/// The shared secret guarding `/translate`.
///
/// The value is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wraps a configured token. Empty strings mean "no token".
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(Zeroizing::new(token)))
        }
    }

    /// Compares a presented credential against the token.
    ///
    /// Both sides are hashed first so the comparison time does not depend
    /// on where the strings diverge or on their lengths.
    pub fn matches(&self, presented: &str) -> bool {
        Sha256::digest(self.0.as_bytes()) == Sha256::digest(presented.as_bytes())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Strip an optional `Bearer` scheme from an Authorization header value.
fn credential_from_header(value: &str) -> &str {
    let value = value.trim();
    match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => value,
    }
}

/// Decide whether a call may proceed.
///
/// With no configured token everything is allowed. Otherwise either the
/// `token` parameter or the Authorization header must carry it.
pub fn authorize(
    access_token: Option<&AccessToken>,
    params: &TranslationRequestParams,
    headers: &AuthHeaders,
) -> bool {
    let Some(expected) = access_token else {
        return true;
    };

    let by_param = params
        .token
        .as_deref()
        .is_some_and(|token| expected.matches(token));

    let by_header = headers
        .authorization
        .as_deref()
        .is_some_and(|value| expected.matches(credential_from_header(value)));

    by_param || by_header
}
