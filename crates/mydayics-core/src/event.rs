//! Event records.
//!
//! [`EventRecord`] is the validated, provider-agnostic form of one calendar
//! item. Records are produced by the provider normalizer, previewed by the
//! client and rendered by the [`ics`](crate::ics) exporter.

use serde::{Deserialize, Serialize};

use crate::time::EventTimestamp;

/// Subject used when the provider omits one.
pub const DEFAULT_SUBJECT: &str = "No Title";

/// Location placeholder shown in previews when the provider omits one.
pub const LOCATION_PLACEHOLDER: &str = "TBD";

/// Suffix appended to generated identifiers.
pub const GENERATED_UID_DOMAIN: &str = "mydayics";

/// Generates a globally unique identifier for an event without one.
pub fn generate_uid() -> String {
    format!("{}@{}", uuid::Uuid::new_v4(), GENERATED_UID_DOMAIN)
}

/// A normalized calendar event.
///
/// `start <= end` is not enforced: the scheduling API occasionally returns
/// inverted items and they are exported as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Identifier from the provider, or a generated one.
    pub id: Option<String>,
    /// The event title.
    pub subject: String,
    /// Where the event takes place.
    pub location: Option<String>,
    /// When the event starts.
    pub start: EventTimestamp,
    /// When the event ends.
    pub end: EventTimestamp,
    /// Link back to the event in the provider's UI.
    pub link: Option<String>,
}

impl EventRecord {
    /// Creates a record with the default subject and no optional fields.
    pub fn new(start: EventTimestamp, end: EventTimestamp) -> Self {
        Self {
            id: None,
            subject: DEFAULT_SUBJECT.to_string(),
            location: None,
            start,
            end,
            link: None,
        }
    }

    /// Builder method to set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method to set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the provider link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// The identifier if it is present and not blank.
    pub fn uid(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// The location, or [`LOCATION_PLACEHOLDER`].
    pub fn location_or_placeholder(&self) -> &str {
        self.location.as_deref().unwrap_or(LOCATION_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> EventTimestamp {
        EventTimestamp::parse(s).unwrap()
    }

    #[test]
    fn new_uses_defaults() {
        let record = EventRecord::new(ts("2026-02-10T09:00:00"), ts("2026-02-10T10:00:00"));
        assert_eq!(record.subject, DEFAULT_SUBJECT);
        assert!(record.id.is_none());
        assert!(record.uid().is_none());
        assert_eq!(record.location_or_placeholder(), "TBD");
    }

    #[test]
    fn builder_sets_fields() {
        let record = EventRecord::new(ts("2026-02-10T09:00:00"), ts("2026-02-10T10:00:00"))
            .with_id("abc-1")
            .with_subject("Lab")
            .with_location("Room 101")
            .with_link("https://myday.example/item/1");
        assert_eq!(record.uid(), Some("abc-1"));
        assert_eq!(record.subject, "Lab");
        assert_eq!(record.location_or_placeholder(), "Room 101");
        assert_eq!(record.link.as_deref(), Some("https://myday.example/item/1"));
    }

    #[test]
    fn blank_id_is_not_a_uid() {
        let record =
            EventRecord::new(ts("2026-02-10T09:00:00"), ts("2026-02-10T10:00:00")).with_id("  ");
        assert!(record.uid().is_none());
    }

    #[test]
    fn generated_uids_are_unique() {
        let a = generate_uid();
        let b = generate_uid();
        assert_ne!(a, b);
        assert!(a.ends_with("@mydayics"));
    }

    #[test]
    fn inverted_times_are_kept() {
        let record = EventRecord::new(ts("2026-02-10T10:00:00"), ts("2026-02-10T09:00:00"));
        assert_eq!(record.start.as_str(), "2026-02-10T10:00:00");
        assert_eq!(record.end.as_str(), "2026-02-10T09:00:00");
    }
}
