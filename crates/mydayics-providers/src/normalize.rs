//! RawEvent to EventRecord conversion.
//!
//! Items without a usable `Start` and `End` are dropped here. Drops are not
//! errors: they are logged at debug level and counted, and only show up to
//! the user as a smaller event count.

use mydayics_core::{DEFAULT_SUBJECT, EventRecord, EventTimestamp, generate_uid};
use serde_json::Value;
use tracing::debug;

use crate::raw_event::RawEvent;

/// Result of normalizing one `results` array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    /// Records that passed validation, in provider order.
    pub events: Vec<EventRecord>,
    /// Entries that were dropped.
    pub discarded: usize,
}

impl NormalizedBatch {
    /// Number of entries seen, kept or not.
    pub fn received(&self) -> usize {
        self.events.len() + self.discarded
    }
}

/// Converts a [`RawEvent`] to an [`EventRecord`].
///
/// Returns `None` if `start` or `end` is missing or has no date/time
/// separator. Missing subjects become [`DEFAULT_SUBJECT`]; a missing
/// identifier is replaced by a generated one.
pub fn normalize_event(raw: &RawEvent) -> Option<EventRecord> {
    let start = raw.start.as_deref().and_then(EventTimestamp::parse)?;
    let end = raw.end.as_deref().and_then(EventTimestamp::parse)?;

    let id = raw.id.clone().unwrap_or_else(generate_uid);
    let subject = raw.subject.as_deref().unwrap_or(DEFAULT_SUBJECT);

    let mut record = EventRecord::new(start, end)
        .with_id(id)
        .with_subject(subject);

    if let Some(ref location) = raw.location {
        record = record.with_location(location);
    }

    if let Some(ref link) = raw.item_link {
        record = record.with_link(link);
    }

    Some(record)
}

/// Normalizes every entry of a `results` array, keeping order.
pub fn normalize_results(results: &[Value]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for (index, value) in results.iter().enumerate() {
        match RawEvent::from_value(value).as_ref().and_then(normalize_event) {
            Some(record) => batch.events.push(record),
            None => {
                debug!(index, "dropping calendar item without usable start/end");
                batch.discarded += 1;
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_item() {
        let raw = RawEvent {
            id: Some("abc".to_string()),
            subject: Some("Lab".to_string()),
            location: Some("Room 101".to_string()),
            start: Some("2026-02-10T09:00:00+02:00".to_string()),
            end: Some("2026-02-10T10:00:00+02:00".to_string()),
            item_link: Some("https://myday.example/abc".to_string()),
        };
        let record = normalize_event(&raw).unwrap();
        assert_eq!(record.uid(), Some("abc"));
        assert_eq!(record.subject, "Lab");
        assert_eq!(record.location.as_deref(), Some("Room 101"));
        assert_eq!(record.start.as_str(), "2026-02-10T09:00:00+02:00");
        assert_eq!(record.link.as_deref(), Some("https://myday.example/abc"));
    }

    #[test]
    fn defaults_for_missing_fields() {
        let raw = RawEvent::default()
            .with_start("2026-02-10T09:00:00")
            .with_end("2026-02-10T10:00:00");
        let record = normalize_event(&raw).unwrap();
        assert_eq!(record.subject, "No Title");
        assert!(record.location.is_none());
        assert_eq!(record.location_or_placeholder(), "TBD");
        assert!(record.uid().unwrap().ends_with("@mydayics"));
    }

    #[test]
    fn generated_ids_differ() {
        let raw = RawEvent::default()
            .with_start("2026-02-10T09:00:00")
            .with_end("2026-02-10T10:00:00");
        let a = normalize_event(&raw).unwrap();
        let b = normalize_event(&raw).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn missing_start_or_end_is_rejected() {
        let no_start = RawEvent::default().with_end("2026-02-10T10:00:00");
        let no_end = RawEvent::default().with_start("2026-02-10T09:00:00");
        let date_only = RawEvent::default()
            .with_start("2026-02-10")
            .with_end("2026-02-10T10:00:00");
        assert!(normalize_event(&no_start).is_none());
        assert!(normalize_event(&no_end).is_none());
        assert!(normalize_event(&date_only).is_none());
    }

    #[test]
    fn inverted_times_pass_through() {
        let raw = RawEvent::default()
            .with_start("2026-02-10T11:00:00")
            .with_end("2026-02-10T10:00:00");
        assert!(normalize_event(&raw).is_some());
    }

    #[test]
    fn batch_counts_discarded_entries() {
        let results = vec![
            json!({"Id": "1", "Subject": "A", "Start": "2026-02-10T09:00:00", "End": "2026-02-10T10:00:00"}),
            json!({"Id": "2", "Subject": "B", "End": "2026-02-11T10:00:00"}),
            json!("not an object"),
            json!({"Id": "4", "Subject": "D", "Start": "2026-02-12T09:00:00", "End": "2026-02-12T10:00:00"}),
        ];
        let batch = normalize_results(&results);

        assert_eq!(batch.events.len(), 2);
        assert_eq!(batch.discarded, 2);
        assert_eq!(batch.received(), 4);
        assert_eq!(batch.events.len(), results.len() - batch.discarded);

        let subjects: Vec<&str> = batch.events.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, vec!["A", "D"]);
    }

    #[test]
    fn empty_results() {
        let batch = normalize_results(&[]);
        assert!(batch.events.is_empty());
        assert_eq!(batch.discarded, 0);
    }
}
