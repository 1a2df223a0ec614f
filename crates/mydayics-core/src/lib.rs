//! Core types: timeframes, event records, iCalendar export, formatting

pub mod event;
pub mod format;
pub mod ics;
pub mod time;
pub mod tracing;

pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use event::{DEFAULT_SUBJECT, EventRecord, LOCATION_PLACEHOLDER, generate_uid};
pub use format::{bulletize, ellipsis, preview_line};
pub use ics::{CalendarDocument, ExportError, ExportSummary, export_calendar};
pub use time::{EventTimestamp, TimeWindow, TimeframeError, TimeframeMode, compact_utc, parse_date};
