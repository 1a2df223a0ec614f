//! Raw event type from the scheduling API.
//!
//! The API is not consistent about field casing or types: the same feed can
//! carry `Id` as a string on one item and as a number on the next, and
//! `Location` may be missing, `null` or blank. [`RawEvent`] captures each
//! field as optional text without judging it; validation is the job of
//! [`normalize_event`](crate::normalize_event).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Looks up `key` in `map`, exact match first, then ASCII case-insensitive.
pub(crate) fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

/// Renders a scalar JSON value as text. Blank strings, `null`, arrays and
/// objects yield `None`.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A calendar item as returned by the API, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Provider identifier (`Id`).
    pub id: Option<String>,
    /// Title (`Subject`).
    pub subject: Option<String>,
    /// Room or place (`Location`).
    pub location: Option<String>,
    /// Start timestamp text (`Start`).
    pub start: Option<String>,
    /// End timestamp text (`End`).
    pub end: Option<String>,
    /// Link to the item in the MyDay UI (`ItemLink`).
    pub item_link: Option<String>,
}

impl RawEvent {
    /// Field names used by the API.
    pub const ID: &'static str = "Id";
    pub const SUBJECT: &'static str = "Subject";
    pub const LOCATION: &'static str = "Location";
    pub const START: &'static str = "Start";
    pub const END: &'static str = "End";
    pub const ITEM_LINK: &'static str = "ItemLink";

    /// Extracts the known fields from one entry of the `results` array.
    ///
    /// Returns `None` if the entry is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let text = |key: &str| lookup(map, key).and_then(scalar_text);

        Some(Self {
            id: text(Self::ID),
            subject: text(Self::SUBJECT),
            location: text(Self::LOCATION),
            start: text(Self::START),
            end: text(Self::END),
            item_link: text(Self::ITEM_LINK),
        })
    }

    /// Builder method to set the start text.
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Builder method to set the end text.
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Builder method to set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}
