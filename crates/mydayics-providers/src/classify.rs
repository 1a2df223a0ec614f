//! Response classification.
//!
//! Turns the raw result of one HTTP exchange into a [`FetchOutcome`]. The
//! status code alone decides the category and the hint; the response body
//! is only mined for an optional detail line. Extracting that detail is
//! best-effort: every path returns `Option` and nothing here can fail in a
//! way that hides the status classification.

use std::sync::LazyLock;

use mydayics_core::{bulletize, ellipsis};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ProviderErrorCode;
use crate::normalize::normalize_results;
use crate::outcome::FetchOutcome;
use crate::raw_event::{lookup, scalar_text};

/// Hint for transport failures.
pub const NETWORK_ERROR_HINT: &str = "could not reach the server; check your network connection";
/// Hint for 401 and 403.
pub const AUTH_HINT: &str = "token missing, invalid, or expired";
/// Hint for 404.
pub const NOT_FOUND_HINT: &str = "endpoint not found";
/// Hint for 5xx.
pub const SERVER_ERROR_HINT: &str = "upstream server error";
/// Hint for a 200 whose body is not a results collection.
pub const UNEXPECTED_RESPONSE_HINT: &str = "unexpected response from server";
/// Detail substituted when the body is an HTML page (usually a login redirect).
pub const SESSION_EXPIRED_HINT: &str =
    "received a web page instead of data; the session has probably expired, sign in and copy a fresh token";

/// Longest raw-text detail kept, ellipsis included.
pub const DETAIL_MAX_CHARS: usize = 150;

/// Name of the collection holding the events in a 200 response.
pub const RESULTS_KEY: &str = "results";

/// Keys that usually carry a human-readable error message, in priority order.
const DETAIL_KEYS: [&str; 4] = ["message", "description", "error", "error_description"];

static HTML_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(!doctype\s+html|html|head|body)[\s>]").expect("valid regex")
});

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// What went wrong at the transport level.
    pub message: String,
}

impl TransportFailure {
    /// Creates a transport failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Classifies the result of one request.
pub fn classify(result: Result<HttpResponse, TransportFailure>) -> FetchOutcome {
    match result {
        Ok(response) => classify_response(&response),
        Err(failure) => {
            warn!(cause = %failure.message, "transport failure");
            FetchOutcome::transport(format!("{} ({})", NETWORK_ERROR_HINT, failure.message))
        }
    }
}

/// Classifies a response that was received.
pub fn classify_response(response: &HttpResponse) -> FetchOutcome {
    if response.status == 200 {
        return classify_ok_body(&response.body);
    }

    let code = ProviderErrorCode::from_status(response.status);
    let hint = match code {
        ProviderErrorCode::AuthenticationFailed | ProviderErrorCode::AuthorizationFailed => {
            AUTH_HINT.to_string()
        }
        ProviderErrorCode::NotFound => NOT_FOUND_HINT.to_string(),
        ProviderErrorCode::ServerError => SERVER_ERROR_HINT.to_string(),
        _ => format!("unexpected HTTP status {}", response.status),
    };
    let detail = extract_detail(&response.body);

    warn!(status = response.status, %code, "request rejected");
    FetchOutcome::api_error(code, hint, detail)
}

fn classify_ok_body(body: &str) -> FetchOutcome {
    let results = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| match value {
            Value::Object(map) => match lookup(&map, RESULTS_KEY) {
                Some(Value::Array(items)) => Some(items.clone()),
                _ => None,
            },
            _ => None,
        });

    match results {
        Some(items) => {
            let batch = normalize_results(&items);
            debug!(
                received = batch.received(),
                kept = batch.events.len(),
                discarded = batch.discarded,
                "classified results"
            );
            FetchOutcome::success(batch.events, batch.discarded)
        }
        None => {
            warn!("200 response without a results collection");
            FetchOutcome::api_error(
                ProviderErrorCode::InvalidResponse,
                UNEXPECTED_RESPONSE_HINT,
                extract_detail(body),
            )
        }
    }
}

/// Pulls a human-readable explanation out of an error body.
///
/// In order of preference:
/// 1. a `message`/`description`/`error` field of a JSON object, looking one
///    level into the field if it is itself an object
/// 2. bullet lines built from the object's scalar fields
/// 3. for non-JSON bodies, [`SESSION_EXPIRED_HINT`] if the body is HTML,
///    otherwise the text cut to [`DETAIL_MAX_CHARS`]
///
/// Returns `None` when nothing useful is found.
pub fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => message_field(&map).or_else(|| scalar_bullets(&map)),
        Ok(Value::String(text)) => {
            let text = text.trim();
            (!text.is_empty()).then(|| ellipsis(text, DETAIL_MAX_CHARS).into_owned())
        }
        Ok(_) => Some(ellipsis(trimmed, DETAIL_MAX_CHARS).into_owned()),
        Err(_) if looks_like_html(trimmed) => Some(SESSION_EXPIRED_HINT.to_string()),
        Err(_) => Some(ellipsis(trimmed, DETAIL_MAX_CHARS).into_owned()),
    }
}

fn message_field(map: &Map<String, Value>) -> Option<String> {
    DETAIL_KEYS.iter().find_map(|key| match lookup(map, key)? {
        Value::Object(inner) => DETAIL_KEYS
            .iter()
            .find_map(|inner_key| lookup(inner, inner_key).and_then(scalar_text)),
        value => scalar_text(value),
    })
}

fn scalar_bullets(map: &Map<String, Value>) -> Option<String> {
    let lines: Vec<String> = map
        .iter()
        .filter_map(|(key, value)| scalar_text(value).map(|text| format!("{}: {}", key, text)))
        .collect();

    (!lines.is_empty()).then(|| bulletize(&lines))
}

fn looks_like_html(body: &str) -> bool {
    HTML_MARKER.is_match(body)
}
