//! Bearer credential handling.
//!
//! Users paste tokens copied from browser dev tools, sometimes with the
//! `Bearer ` scheme and sometimes without. The token itself is opaque; the
//! only normalization is adding the scheme when it is missing.

use std::fmt;

/// The HTTP authentication scheme sent with every request.
pub const BEARER_SCHEME: &str = "Bearer";

/// Prefixes `Bearer ` unless the token already carries the scheme.
///
/// Idempotent: `normalize_bearer(&normalize_bearer(t)) == normalize_bearer(t)`.
pub fn normalize_bearer(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(BEARER_SCHEME) {
        return BEARER_SCHEME.to_string();
    }
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{} {}", BEARER_SCHEME, trimmed)
    }
}

fn has_scheme(token: &str) -> bool {
    token
        .get(..BEARER_SCHEME.len() + 1)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bearer "))
}

/// A normalized `Authorization` header value.
///
/// `Debug` and `Display` never print the token.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Normalizes `raw` into a header value.
    pub fn new(raw: &str) -> Self {
        Self(normalize_bearer(raw))
    }

    /// The value for the `Authorization` header.
    pub fn header_value(&self) -> &str {
        &self.0
    }

    /// Returns true if there is no credential after the scheme.
    pub fn is_empty(&self) -> bool {
        self.0.eq_ignore_ascii_case(BEARER_SCHEME)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken({})", self)
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{} <empty>", BEARER_SCHEME)
        } else {
            write!(f, "{} ****", BEARER_SCHEME)
        }
    }
}
