//! iCalendar export.
//!
//! Renders [`EventRecord`]s into a single `VCALENDAR` document. The document
//! is assembled completely in memory before anything is written, so a caller
//! writing to a file never sees a half-rendered calendar caused by a bad
//! record: records whose timestamps cannot be compacted are skipped and
//! counted instead.

use std::io::Write;

use chrono::Duration;
use icalendar::{Alarm, Calendar, Component, EventLike, Trigger};
use thiserror::Error;
use tracing::{debug, info};

use crate::event::{EventRecord, generate_uid};

/// PRODID written into every exported calendar.
pub const PRODUCT_ID: &str = "-//mydayics//EN";

/// How long before the start the display reminder fires.
pub const REMINDER_MINUTES: i64 = 15;

/// Errors from building or writing a calendar export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Every record was skipped, or none were given.
    #[error("no exportable events ({skipped} skipped)")]
    NoEvents { skipped: usize },

    /// The sink rejected the document.
    #[error("failed to write calendar: {0}")]
    Write(#[from] std::io::Error),
}

/// Counts reported after an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of `VEVENT` blocks in the document.
    pub exported: usize,
    /// Records dropped because their timestamps could not be rendered.
    pub skipped: usize,
}

/// A fully rendered calendar, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDocument {
    text: String,
    summary: ExportSummary,
}

impl CalendarDocument {
    /// Renders `records` in order.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoEvents`] if no record could be rendered.
    pub fn build(records: &[EventRecord]) -> Result<Self, ExportError> {
        let mut cal = Calendar::new();
        let mut summary = ExportSummary::default();

        for record in records {
            match build_event(record) {
                Some(event) => {
                    cal.push(event);
                    summary.exported += 1;
                }
                None => {
                    debug!(
                        start = record.start.as_str(),
                        end = record.end.as_str(),
                        "skipping event with unrenderable timestamps"
                    );
                    summary.skipped += 1;
                }
            }
        }

        if summary.exported == 0 {
            return Err(ExportError::NoEvents {
                skipped: summary.skipped,
            });
        }

        let text = finalize(&cal.done().to_string());
        Ok(Self { text, summary })
    }

    /// The document text (CRLF line endings).
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Export counts.
    pub fn summary(&self) -> ExportSummary {
        self.summary
    }

    /// Number of `VEVENT` blocks.
    pub fn event_count(&self) -> usize {
        self.summary.exported
    }

    /// Writes the whole document to `sink` in one call and flushes it.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<ExportSummary, ExportError> {
        sink.write_all(self.text.as_bytes())?;
        sink.flush()?;
        info!(
            exported = self.summary.exported,
            skipped = self.summary.skipped,
            bytes = self.text.len(),
            "calendar written"
        );
        Ok(self.summary)
    }
}

/// Builds a document from `records` and writes it to `sink`.
pub fn export_calendar<W: Write>(
    records: &[EventRecord],
    sink: &mut W,
) -> Result<ExportSummary, ExportError> {
    CalendarDocument::build(records)?.write_to(sink)
}

/// Converts one record to a `VEVENT`, or `None` if its times do not render.
fn build_event(record: &EventRecord) -> Option<icalendar::Event> {
    let start = record.start.to_compact_utc()?;
    let end = record.end.to_compact_utc()?;

    let uid = record
        .uid()
        .map(str::to_string)
        .unwrap_or_else(generate_uid);

    let mut event = icalendar::Event::new();
    event.uid(&uid);
    // DTSTAMP mirrors the start so repeated exports are byte-identical
    event.add_property("DTSTAMP", &start);
    event.add_property("DTSTART", &start);
    event.add_property("DTEND", &end);
    event.summary(&record.subject);

    if let Some(ref location) = record.location {
        event.location(location);
    }

    if let Some(ref link) = record.link {
        event.description(&format!("Link: {}", link));
    }

    let trigger = Trigger::before_start(Duration::minutes(REMINDER_MINUTES));
    event.alarm(Alarm::display(&record.subject, trigger));

    Some(event.done())
}

/// Rewrites the icalendar crate's envelope into ours.
///
/// - PRODID is replaced and followed by `METHOD:PUBLISH`
/// - DTSTAMP and UID inside VALARM are dropped (not required by RFC 5545)
fn finalize(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + 64);
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODUCT_ID);
            result.push_str("\r\nMETHOD:PUBLISH\r\n");
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::EventTimestamp;

    fn record(start: &str, end: &str, subject: &str) -> EventRecord {
        EventRecord::new(
            EventTimestamp::parse(start).unwrap(),
            EventTimestamp::parse(end).unwrap(),
        )
        .with_subject(subject)
    }

    fn lines(doc: &CalendarDocument) -> Vec<&str> {
        doc.as_str().lines().collect()
    }

    #[test]
    fn offset_is_dropped_not_converted() {
        let lab = record("2026-02-10T09:00:00+02:00", "2026-02-10T10:00:00+02:00", "Lab");
        let doc = CalendarDocument::build(&[lab]).unwrap();
        let lines = lines(&doc);

        assert!(lines.contains(&"DTSTART:20260210T090000Z"));
        assert!(lines.contains(&"DTEND:20260210T100000Z"));
        assert!(lines.contains(&"SUMMARY:Lab"));
    }

    #[test]
    fn envelope_header_and_footer() {
        let doc = CalendarDocument::build(&[record(
            "2026-02-10T09:00:00Z",
            "2026-02-10T10:00:00Z",
            "Lecture",
        )])
        .unwrap();
        let lines = lines(&doc);

        assert_eq!(lines.first(), Some(&"BEGIN:VCALENDAR"));
        assert_eq!(lines.last(), Some(&"END:VCALENDAR"));
        assert!(lines.contains(&"VERSION:2.0"));
        assert!(lines.contains(&"PRODID:-//mydayics//EN"));
        assert!(lines.contains(&"METHOD:PUBLISH"));
        assert!(doc.as_str().ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn one_block_per_record_with_uids() {
        let records: Vec<EventRecord> = (0..5)
            .map(|i| {
                record(
                    &format!("2026-02-1{}T09:00:00", i),
                    &format!("2026-02-1{}T10:00:00", i),
                    "Seminar",
                )
            })
            .collect();
        let doc = CalendarDocument::build(&records).unwrap();
        let lines = lines(&doc);

        assert_eq!(doc.event_count(), 5);
        assert_eq!(lines.iter().filter(|l| **l == "BEGIN:VEVENT").count(), 5);
        assert_eq!(lines.iter().filter(|l| **l == "END:VEVENT").count(), 5);

        let uids: Vec<&str> = lines
            .iter()
            .filter_map(|l| l.strip_prefix("UID:"))
            .collect();
        assert_eq!(uids.len(), 5);
        assert!(uids.iter().all(|uid| !uid.is_empty()));
        let unique: std::collections::HashSet<_> = uids.iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn provider_id_is_used_as_uid() {
        let doc = CalendarDocument::build(&[record(
            "2026-02-10T09:00:00",
            "2026-02-10T10:00:00",
            "Lab",
        )
        .with_id("item-42")])
        .unwrap();
        assert!(lines(&doc).contains(&"UID:item-42"));
    }

    #[test]
    fn blank_id_falls_back_to_generated_uid() {
        let doc = CalendarDocument::build(&[record(
            "2026-02-10T09:00:00",
            "2026-02-10T10:00:00",
            "Lab",
        )
        .with_id("")])
        .unwrap();
        let uid = lines(&doc)
            .into_iter()
            .find_map(|l| l.strip_prefix("UID:"))
            .unwrap()
            .to_string();
        assert!(uid.ends_with("@mydayics"));
    }

    #[test]
    fn location_line_only_when_present() {
        let without = CalendarDocument::build(&[record(
            "2026-02-10T09:00:00",
            "2026-02-10T10:00:00",
            "Lab",
        )])
        .unwrap();
        assert!(!without.as_str().contains("LOCATION"));

        let with = CalendarDocument::build(&[record(
            "2026-02-10T09:00:00",
            "2026-02-10T10:00:00",
            "Lab",
        )
        .with_location("Room 101")])
        .unwrap();
        assert!(lines(&with).contains(&"LOCATION:Room 101"));
    }

    #[test]
    fn link_becomes_description() {
        let doc = CalendarDocument::build(&[record(
            "2026-02-10T09:00:00",
            "2026-02-10T10:00:00",
            "Lab",
        )
        .with_link("https://myday.example/1")])
        .unwrap();
        assert!(doc.as_str().contains("DESCRIPTION:Link: https://myday.example/1"));
    }

    #[test]
    fn every_event_has_display_reminder() {
        let doc = CalendarDocument::build(&[
            record("2026-02-10T09:00:00", "2026-02-10T10:00:00", "A"),
            record("2026-02-11T09:00:00", "2026-02-11T10:00:00", "B"),
        ])
        .unwrap();
        let lines = lines(&doc);

        assert_eq!(lines.iter().filter(|l| **l == "BEGIN:VALARM").count(), 2);
        assert_eq!(lines.iter().filter(|l| **l == "ACTION:DISPLAY").count(), 2);
        assert_eq!(lines.iter().filter(|l| l.starts_with("TRIGGER")).count(), 2);
        // Only the two VEVENT UIDs remain
        assert_eq!(lines.iter().filter(|l| l.starts_with("UID:")).count(), 2);
    }

    #[test]
    fn dtstamp_mirrors_start() {
        let doc = CalendarDocument::build(&[record(
            "2026-02-10T09:00:00",
            "2026-02-10T10:00:00",
            "Lab",
        )])
        .unwrap();
        let lines = lines(&doc);
        assert!(lines.contains(&"DTSTAMP:20260210T090000Z"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("DTSTAMP:")).count(), 1);
    }

    #[test]
    fn unrenderable_record_is_skipped_not_fatal() {
        let good = record("2026-02-10T09:00:00", "2026-02-10T10:00:00", "Good");
        let bad = record("2026-02-10Tmorning", "2026-02-10T10:00:00", "Bad");
        let doc = CalendarDocument::build(&[good, bad]).unwrap();

        assert_eq!(
            doc.summary(),
            ExportSummary {
                exported: 1,
                skipped: 1
            }
        );
        assert!(doc.as_str().contains("SUMMARY:Good"));
        assert!(!doc.as_str().contains("SUMMARY:Bad"));
    }

    #[test]
    fn inverted_event_is_exported_as_received() {
        let doc = CalendarDocument::build(&[record(
            "2026-02-10T10:00:00",
            "2026-02-10T09:00:00",
            "Backwards",
        )])
        .unwrap();
        let lines = lines(&doc);
        assert!(lines.contains(&"DTSTART:20260210T100000Z"));
        assert!(lines.contains(&"DTEND:20260210T090000Z"));
    }

    #[test]
    fn nothing_to_export_is_an_error() {
        assert!(matches!(
            CalendarDocument::build(&[]),
            Err(ExportError::NoEvents { skipped: 0 })
        ));

        let bad = record("xTy", "2026-02-10T10:00:00", "Bad");
        assert!(matches!(
            CalendarDocument::build(&[bad]),
            Err(ExportError::NoEvents { skipped: 1 })
        ));
    }

    #[test]
    fn export_writes_whole_document() {
        let records = [record("2026-02-10T09:00:00", "2026-02-10T10:00:00", "Lab")];
        let mut sink = Vec::new();
        let summary = export_calendar(&records, &mut sink).unwrap();

        assert_eq!(summary.exported, 1);
        let text = String::from_utf8(sink).unwrap();
        assert!(text.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(text.ends_with("END:VCALENDAR\r\n"));
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_surfaces_error_text() {
        let records = [record("2026-02-10T09:00:00", "2026-02-10T10:00:00", "Lab")];
        let err = export_calendar(&records, &mut FailingSink).unwrap_err();
        assert!(matches!(err, ExportError::Write(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
